pub mod file;
pub mod rates_api;
pub mod util;

pub use file::FileRateSource;
pub use rates_api::RatesApiProvider;
