pub mod attributes;
pub mod classify;
pub mod clauses;
pub mod context;
pub mod cursor;
pub mod declaration;
pub mod event_repair;
pub mod naming;
pub mod parameters;
pub mod patterns;
pub mod resolver;
pub mod scanner;
pub mod trivia;
pub mod xml_doc;

pub use attributes::AttributeInfo;
pub use classify::{Classification, classify};
pub use context::ParentContext;
pub use cursor::TextCursor;
pub use event_repair::{Boundaries, repair_event};
pub use parameters::{Parameter, ParameterMode, parse_parameter_list};
pub use resolver::SymbolResolver;
pub use scanner::{Direction, Scanner, TokenMatch, TokenSearch};
pub use trivia::{HeaderTrivia, Trivia, TriviaKind};
pub use xml_doc::{XmlDocumentation, XmlNamedEntry};
