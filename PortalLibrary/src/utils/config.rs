use std::fs;
use tokio::sync::RwLock;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use crate::utils::logging::*;

lazy_static! {
    static ref CONFIG: RwLock<Config> = RwLock::new(Config::new());
}

#[derive(Debug, Deserialize)]
struct ConfigTable {
    #[serde(rename = "Config")]
    config: Config,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct Config {
    pub http_server_bind_port: u16, //port
    pub bind_retry_duration: u64, //seconds
    pub detection_timeout: u64, //seconds
    pub database_path: String, //path
    pub database_max_connections: u32, //connections
    pub default_container_width: u32, //pixels
    pub default_container_height: u32, //pixels
    pub stroke_width: u32, //pixels
    pub font_size: f32, //points
    pub high_confidence_color: [u8; 3], //RGB
    pub medium_confidence_color: [u8; 3], //RGB
    pub low_confidence_color: [u8; 3], //RGB
    pub label_text_color: [u8; 3], //RGB
}

impl Config {
    pub fn new() -> Self {
        //Seriously, the program must be terminated.
        match fs::read_to_string("./portal.toml") {
            Ok(toml_string) => {
                match toml::from_str::<ConfigTable>(&toml_string) {
                    Ok(config_table) => {
                        let config = config_table.config;
                        if !Self::validate(&config) {
                            logging_console!(emergency_entry!("Config", "Invalid configuration file"));
                            panic!("Invalid configuration file");
                        }
                        config
                    },
                    Err(err) => {
                        logging_console!(emergency_entry!("Config", "Unable to parse configuration file", format!("Err: {err}")));
                        panic!("Unable to parse configuration file");
                    },
                }
            },
            Err(err) => {
                logging_console!(emergency_entry!("Config", "Configuration file not found", format!("Err: {err}")));
                panic!("Configuration file not found");
            },
        }
    }

    pub async fn now() -> Config {
        CONFIG.read().await.clone()
    }

    pub async fn update(config: Config) {
        *CONFIG.write().await = config
    }

    pub fn validate(config: &Config) -> bool {
        Config::validate_second(config.bind_retry_duration)
            && Config::validate_second(config.detection_timeout)
            && Config::validate_path(&config.database_path)
            && Config::validate_count(config.database_max_connections)
            && Config::validate_pixel(config.default_container_width)
            && Config::validate_pixel(config.default_container_height)
            && Config::validate_pixel(config.stroke_width)
            && Config::validate_font_size(config.font_size)
    }

    fn validate_second(second: u64) -> bool {
        second <= 3600
    }

    fn validate_path(path: &str) -> bool {
        !path.trim().is_empty()
    }

    fn validate_count(count: u32) -> bool {
        count > 0_u32
    }

    fn validate_pixel(pixel: u32) -> bool {
        pixel > 0_u32 && pixel <= 8192_u32
    }

    fn validate_font_size(size: f32) -> bool {
        size > 0_f32
    }
}
