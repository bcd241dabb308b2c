use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};

#[derive(Parser)]
#[derive(ClapSerde)]
#[command(author, version, about, long_about = None)]
/// Concurrent implementation of the Boids (Reynolds '86) flocking rules:
/// every bird runs as its own task against a shared flock.
pub struct Args {
    /// Config file
    #[arg(short, long = "config", default_value = "config.toml")]
    pub config_path: std::path::PathBuf,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the
/// `-c` or `--config` arg option
pub struct Config {
    #[default(128)]
    #[arg(short = 'n', long)]
    /// number of birds
    pub no_birds: usize,

    #[default(0.34)]
    #[arg(short = 's', long = "separation")]
    /// separation weight, in [0, 1]
    pub separation_weight: f64,

    #[default(0.33)]
    #[arg(short = 'o', long = "cohesion")]
    /// cohesion weight, in [0, 1]
    pub cohesion_weight: f64,

    #[default(0.33)]
    #[arg(short = 'a', long = "alignment")]
    /// alignment weight, in [0, 1]; the three weights must sum to 1
    pub alignment_weight: f64,

    #[default(640.)]
    #[arg(short = 'd', long)]
    /// world dimension (square), world units
    pub dimension: f64,

    #[default(30.)]
    #[arg(short = 'p', long)]
    /// padding margin on each edge of the world
    pub padding: f64,

    #[default(100.)]
    #[arg(long = "spawn_radius")]
    /// radius of the spawn disk around the world center
    pub spawn_radius: f64,

    #[default(1.0)]
    #[arg(long = "init_speed")]
    pub init_speed: f64,

    #[default(2.0)]
    #[arg(long = "max_speed")]
    pub max_speed: f64,

    #[default(0.03)]
    #[arg(long = "max_force")]
    pub max_force: f64,

    #[default(25.)]
    #[arg(long = "sens_dist")]
    /// neighbour-sensing radius shared by all three rules
    pub sensory_distance: f64,

    #[default(400)]
    #[arg(long = "tick_us")]
    /// per-bird tick scaling in microseconds; each bird sleeps
    /// tick_us * no_birds between steps
    pub tick_per_bird_us: u64,

    #[default(123456789)]
    #[arg(long)]
    /// placement/heading seed; same seed, same initial flock
    pub seed: u64,

    #[default(4)]
    #[arg(short = 'r', long)]
    /// ratio of observations/sample_rate, e.g. 4 = sample every 4th observation
    pub sample_rate: u64,

    #[default(10)]
    #[arg(short = 't', long)]
    /// wall-clock runtime in seconds
    pub run_seconds: u64,
}
