//! # Interactive Shell
//!
//! A line-oriented front end over the command layer.
//!
//! ```text
//! stdin                         Shell                          stdout
//! ─────                         ─────                          ──────
//! add {"id":1,"price":999} ──►  ShellCommand::Add  ──► cart ──► {"ok":{...}}
//! open /nowhere           ──►  ShellCommand::Open ──► route ─► {"error":{...}}
//! quit                     ──►  stop
//! ```
//!
//! One JSON document is written per input line. Logs go to stderr, so
//! stdout stays machine-readable.

use std::str::FromStr;

use serde::Serialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::{debug, info};

use storefront_core::{KeyValueStore, ProductId, ToastId};

use crate::commands::{cart, navigation, toast};
use crate::error::ApiError;
use crate::scheduler::Scheduler;
use crate::state::{AppConfig, CartState, ToastManager};

const HELP: &[&str] = &[
    "cart                       show the cart",
    "add <product-json>         add one unit of a product",
    "remove <id>                remove a product line (id: 7, sku-7 or \"7\")",
    "inc <id>                   increase a line's quantity",
    "dec <id>                   decrease a line's quantity (not below 1)",
    "clear                      empty the cart",
    "toast [--ms <n>] <text>    show a notification",
    "dismiss <id>               dismiss a notification",
    "toasts                     list visible notifications",
    "open <path>                resolve a route",
    "help                       this list",
    "quit                       exit",
];

// =============================================================================
// Parsing
// =============================================================================

/// A parsed shell line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ShellCommand {
    Cart,
    Add(String),
    Remove(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Clear,
    Toast {
        message: String,
        duration_ms: Option<u64>,
    },
    Dismiss(ToastId),
    Toasts,
    Open(String),
    Help,
    Quit,
}

impl FromStr for ShellCommand {
    type Err = ApiError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let command = match verb {
            "cart" => ShellCommand::Cart,
            "add" => ShellCommand::Add(required(verb, rest)?.to_string()),
            "remove" => ShellCommand::Remove(product_id(verb, rest)?),
            "inc" => ShellCommand::Increment(product_id(verb, rest)?),
            "dec" => ShellCommand::Decrement(product_id(verb, rest)?),
            "clear" => ShellCommand::Clear,
            "toast" => parse_toast(rest)?,
            "dismiss" => {
                let id = required(verb, rest)?
                    .parse::<ToastId>()
                    .map_err(|_| ApiError::validation(format!("Invalid toast id: {}", rest)))?;
                ShellCommand::Dismiss(id)
            }
            "toasts" => ShellCommand::Toasts,
            "open" => ShellCommand::Open(required(verb, rest)?.to_string()),
            "help" => ShellCommand::Help,
            "quit" | "exit" => ShellCommand::Quit,
            other => {
                return Err(ApiError::validation(format!(
                    "Unknown command '{}', try 'help'",
                    other
                )))
            }
        };

        Ok(command)
    }
}

fn required<'a>(verb: &str, rest: &'a str) -> Result<&'a str, ApiError> {
    if rest.is_empty() {
        Err(ApiError::validation(format!("'{}' needs an argument", verb)))
    } else {
        Ok(rest)
    }
}

fn product_id(verb: &str, rest: &str) -> Result<ProductId, ApiError> {
    required(verb, rest)?
        .parse::<ProductId>()
        .map_err(|e| ApiError::validation(e.to_string()))
}

fn parse_toast(rest: &str) -> Result<ShellCommand, ApiError> {
    let (duration_ms, message) = match rest.strip_prefix("--ms") {
        Some(after) => {
            let after = after.trim_start();
            let (ms, message) = after.split_once(char::is_whitespace).unwrap_or((after, ""));
            let ms = ms
                .parse::<u64>()
                .map_err(|_| ApiError::validation(format!("Invalid duration: {}", ms)))?;
            (Some(ms), message.trim())
        }
        None => (None, rest),
    };

    Ok(ShellCommand::Toast {
        message: required("toast", message)?.to_string(),
        duration_ms,
    })
}

// =============================================================================
// Shell
// =============================================================================

/// Dispatches shell commands to the command layer.
pub struct Shell<S, T> {
    cart: CartState<S>,
    toasts: ToastManager<T>,
    config: AppConfig,
}

impl<S: KeyValueStore, T: Scheduler> Shell<S, T> {
    pub fn new(cart: CartState<S>, toasts: ToastManager<T>, config: AppConfig) -> Self {
        Shell {
            cart,
            toasts,
            config,
        }
    }

    /// Runs one command. `Quit` is handled by [`Shell::run`] and answers
    /// with `null` here.
    pub async fn execute(&self, command: ShellCommand) -> Result<Value, ApiError> {
        let cart = &self.cart;
        let config = &self.config;

        match command {
            ShellCommand::Cart => to_json(cart::get_cart(cart, config).await),
            ShellCommand::Add(payload) => to_json(cart::add_to_cart(cart, config, &payload).await?),
            ShellCommand::Remove(id) => to_json(cart::remove_from_cart(cart, config, id).await),
            ShellCommand::Increment(id) => {
                to_json(cart::increment_quantity(cart, config, id).await)
            }
            ShellCommand::Decrement(id) => {
                to_json(cart::decrement_quantity(cart, config, id).await)
            }
            ShellCommand::Clear => to_json(cart::clear_cart(cart, config).await),
            ShellCommand::Toast {
                message,
                duration_ms,
            } => to_json(toast::show_toast(&self.toasts, &message, duration_ms)?),
            ShellCommand::Dismiss(id) => to_json(toast::dismiss_toast(&self.toasts, id)),
            ShellCommand::Toasts => to_json(toast::list_toasts(&self.toasts)),
            ShellCommand::Open(path) => to_json(navigation::navigate(&path)?),
            ShellCommand::Help => Ok(json!({ "commands": HELP })),
            ShellCommand::Quit => Ok(Value::Null),
        }
    }

    /// Parses and executes one line, returning the response document.
    ///
    /// `None` means the line was blank or asked to quit.
    pub async fn handle_line(&self, line: &str) -> Option<Value> {
        if line.trim().is_empty() {
            return None;
        }

        let outcome = match line.parse::<ShellCommand>() {
            Ok(ShellCommand::Quit) => return None,
            Ok(command) => self.execute(command).await,
            Err(e) => Err(e),
        };

        Some(match outcome {
            Ok(value) => json!({ "ok": value }),
            Err(e) => json!({ "error": e }),
        })
    }

    /// Reads commands until EOF or `quit`, writing one JSON line per command.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> std::io::Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if is_quit(&line) {
                info!("Quit requested");
                break;
            }

            let Some(response) = self.handle_line(&line).await else {
                continue;
            };

            debug!(command = %line.trim(), "Shell command handled");
            writer.write_all(response.to_string().as_bytes()).await?;
            writer.write_all(b"\n").await?;
            writer.flush().await?;
        }

        Ok(())
    }
}

fn is_quit(line: &str) -> bool {
    matches!(line.trim(), "quit" | "exit")
}

fn to_json<T: Serialize>(value: T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::internal(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduler::TokioScheduler;
    use storefront_core::MemoryStore;

    async fn test_shell() -> Shell<MemoryStore, TokioScheduler> {
        let cart = CartState::load(MemoryStore::new(), "online-store-cart").await;
        let toasts = ToastManager::new(TokioScheduler::current().unwrap());
        Shell::new(cart, toasts, AppConfig::default())
    }

    async fn run_script(shell: &Shell<MemoryStore, TokioScheduler>, script: &str) -> Vec<Value> {
        let mut out = Vec::new();
        shell.run(script.as_bytes(), &mut out).await.unwrap();

        String::from_utf8(out)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!("cart".parse::<ShellCommand>().unwrap(), ShellCommand::Cart);
        assert_eq!(
            "  inc 4 ".parse::<ShellCommand>().unwrap(),
            ShellCommand::Increment(ProductId::from(4))
        );
        assert_eq!(
            "remove sku-9".parse::<ShellCommand>().unwrap(),
            ShellCommand::Remove(ProductId::from("sku-9"))
        );
        assert_eq!(
            r#"dec "12""#.parse::<ShellCommand>().unwrap(),
            ShellCommand::Decrement(ProductId::from("12"))
        );
        assert_eq!(
            r#"add {"id": 1, "price": 10}"#.parse::<ShellCommand>().unwrap(),
            ShellCommand::Add(r#"{"id": 1, "price": 10}"#.to_string())
        );
        assert_eq!(
            "toast --ms 500 Saved it".parse::<ShellCommand>().unwrap(),
            ShellCommand::Toast {
                message: "Saved it".to_string(),
                duration_ms: Some(500),
            }
        );
        assert_eq!(
            "toast Hello there".parse::<ShellCommand>().unwrap(),
            ShellCommand::Toast {
                message: "Hello there".to_string(),
                duration_ms: None,
            }
        );
        assert_eq!(
            "dismiss 3".parse::<ShellCommand>().unwrap(),
            ShellCommand::Dismiss(ToastId(3))
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!("remove".parse::<ShellCommand>().is_err());
        assert!("dismiss x".parse::<ShellCommand>().is_err());
        assert!("toast --ms soon hi".parse::<ShellCommand>().is_err());
        assert!("toast --ms 100".parse::<ShellCommand>().is_err());
        assert!("checkout".parse::<ShellCommand>().is_err());
    }

    #[tokio::test]
    async fn test_cart_session() {
        let shell = test_shell().await;
        let responses = run_script(
            &shell,
            r#"add {"id":1,"price":10}
add {"id":1,"price":10}

add {"id":2,"price":5}
dec 2
cart
quit
cart
"#,
        )
        .await;

        assert_eq!(responses.len(), 5);
        let cart = &responses[4]["ok"];
        assert_eq!(cart["totals"]["cartCount"], 3);
        assert_eq!(cart["totals"]["cartTotalCents"], 2500);
        assert_eq!(cart["totalDisplay"], "$25.00");
        assert_eq!(
            cart["items"],
            json!([
                {"id": 1, "price": 10, "quantity": 2},
                {"id": 2, "price": 5, "quantity": 1}
            ])
        );
    }

    #[tokio::test]
    async fn test_errors_are_reported_inline() {
        let shell = test_shell().await;
        let responses = run_script(&shell, "open /nowhere\nbogus\nopen /\n").await;

        assert_eq!(responses[0]["error"]["code"], "NOT_FOUND");
        assert_eq!(responses[1]["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(responses[2]["ok"]["path"], "/products");
        assert_eq!(responses[2]["ok"]["redirectedFrom"], "/");
    }

    #[tokio::test(start_paused = true)]
    async fn test_toast_session() {
        let shell = test_shell().await;

        let shown = shell.handle_line("toast --ms 50 Added").await.unwrap();
        assert_eq!(shown["ok"]["toasts"][0]["message"], "Added");

        tokio::time::sleep(std::time::Duration::from_millis(60)).await;
        let listed = shell.handle_line("toasts").await.unwrap();
        assert_eq!(listed["ok"], json!([]));
    }

    #[tokio::test]
    async fn test_help_and_blank() {
        let shell = test_shell().await;
        assert!(shell.handle_line("   ").await.is_none());

        let help = shell.handle_line("help").await.unwrap();
        assert_eq!(help["ok"]["commands"].as_array().unwrap().len(), HELP.len());
    }
}
