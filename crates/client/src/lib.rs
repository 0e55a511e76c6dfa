pub mod remote;
pub mod values;

pub use remote::WsClient;
