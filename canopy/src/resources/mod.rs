pub mod device;
pub mod network;
pub mod ssid;
pub mod switch_port;

pub use device::DeviceResource;
pub use network::NetworkResource;
pub use ssid::SsidResource;
pub use switch_port::SwitchPortResource;
