//! Configuration types module

pub mod app;
pub mod auto_factory;
pub mod logging;

pub use app::AppConfig;
pub use auto_factory::AutoFactoryConfig;
pub use logging::LoggingConfig;
