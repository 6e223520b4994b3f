pub mod dialect;
pub mod logging;
pub mod statement;
pub mod tool;
mod validate;

pub use dialect::DialectConfig;
pub use logging::{LogFormat, LoggingConfig};
pub use statement::{StatementFile, StatementKind};
pub use tool::ToolConfig;
