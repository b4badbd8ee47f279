mod scanner;

pub use scanner::{resource_name, ResDirKind, ResourceScanner};
