pub mod loader;
pub mod logging;
pub mod report;

pub use loader::{
    EMBEDDED_BRACKETS, EMBEDDED_PARAMETERS, ParameterLoader, ParameterLoaderError,
    TaxBracketRecord, YearParametersRecord,
};
pub use report::{Report, format_money, format_rate};
