pub mod analysis_printer;
pub mod ast_printer;

pub use analysis_printer::*;
pub use ast_printer::*;
