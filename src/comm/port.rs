use std::net::TcpListener;

/// 同步检查端口是否可用 / Sync check whether a port can be bound
///
/// 通过实际尝试绑定来检测，绑定成功即认为可用
/// Probes by actually binding; a successful bind means the port is free.
pub fn is_port_available_sync(host: &str, port: u16) -> bool {
    TcpListener::bind((host, port)).is_ok()
}
