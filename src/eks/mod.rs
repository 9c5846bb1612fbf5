mod cluster;
mod resources;

pub use cluster::{DeployedCluster, LogSetup, NetworkConfig};
pub use resources::get_cluster;
