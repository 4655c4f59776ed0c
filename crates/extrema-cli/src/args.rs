//! Command-line arguments

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use log::Level;

#[derive(Parser, Debug)]
#[command(
    name = "extrema",
    version,
    about = "Mark local minima or maxima of a grayscale image"
)]
pub struct Cli {
    /// Increase logging verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Log level selected by the number of `-v` flags
    pub fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::Warn,
            1 => Level::Info,
            2 => Level::Debug,
            _ => Level::Trace,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Mark pixels that are the smallest value of their window
    Minima(DetectArgs),
    /// Mark pixels that are the largest value of their window
    Maxima(DetectArgs),
}

#[derive(Args, Debug, Clone)]
pub struct DetectArgs {
    /// Input image (8 or 16-bit grayscale PGM or PNG)
    pub input: PathBuf,

    /// Output image; written as PNG for a .png extension, PGM otherwise
    pub output: PathBuf,

    /// Window radius along x (and y unless --radius-y is given)
    #[arg(short, long, default_value_t = 1)]
    pub radius: u32,

    /// Window radius along y
    #[arg(long)]
    pub radius_y: Option<u32>,

    /// Window shape
    #[arg(long, value_enum, default_value_t = Shape::Box)]
    pub shape: Shape,

    /// Do not mark pixels whose window holds a single value
    #[arg(long)]
    pub no_flat: bool,

    /// Ignore minima above (maxima below) this value
    #[arg(short, long)]
    pub threshold: Option<u32>,

    /// Output value of marked pixels
    #[arg(long, default_value_t = 255)]
    pub foreground: u8,

    /// Output value of other pixels
    #[arg(long, default_value_t = 0)]
    pub background: u8,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    /// Rectangle
    Box,
    /// Disk (ellipse when the radii differ)
    Ball,
    /// Plus sign
    Cross,
}
