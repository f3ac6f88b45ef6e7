pub mod devices;
pub mod networks;
pub mod organizations;
pub mod sensor_readings;

pub use devices::DevicesDataSource;
pub use networks::NetworksDataSource;
pub use organizations::OrganizationsDataSource;
pub use sensor_readings::SensorReadingsDataSource;
