pub mod build_server;
pub mod notifier;

pub use build_server::BuildServerService;
pub use notifier::NotifierService;
