mod context;
mod message;
mod proxy;

pub use context::RpcContext;
pub use message::RpcMessage;
pub use proxy::RpcProxy;
