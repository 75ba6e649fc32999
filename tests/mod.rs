pub mod decoder_test;
pub mod execution_test;
pub mod format_test;
pub mod lib_test;
pub mod report_test;
pub mod resolver_test;
pub mod ticker_test;
pub mod trade_test;
