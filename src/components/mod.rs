pub mod topology_map;
