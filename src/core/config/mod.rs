pub mod config;

pub use config::{
    BasketConfig, BombConfig, CameraConfig, CountdownConfig, CountdownStep, DifficultyConfig,
    GameConfig, PersistenceConfig, SettleConfig, SpawnRange, WindowConfig,
};
