mod values;

pub use values::ValuesParser;
