//! Detection driver behind the subcommands

use log::{info, warn};
use thiserror::Error;

use extrema_core::Image;
use extrema_io::{GrayImage, ImageFormat, IoError};
use extrema_morph::{ExtremaFilter, ExtremumKind, HistogramPixel, Kernel, MorphError};

use crate::args::{Command, DetectArgs, Shape};

/// Errors reported by the command-line tool
#[derive(Debug, Error)]
pub enum CliError {
    /// Reading or writing an image failed
    #[error(transparent)]
    Io(#[from] IoError),

    /// Kernel construction or detection failed
    #[error(transparent)]
    Morph(#[from] MorphError),

    /// An argument does not fit the input image
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

/// Build the window kernel requested on the command line
pub fn build_kernel(args: &DetectArgs) -> Result<Kernel, CliError> {
    let rx = args.radius;
    let ry = args.radius_y.unwrap_or(rx);
    let kernel = match args.shape {
        Shape::Box => Kernel::box_2d(rx, ry)?,
        Shape::Ball => Kernel::ellipsoid(rx, ry, 0)?,
        Shape::Cross => {
            if ry != rx {
                warn!("cross kernels use --radius only; ignoring --radius-y {ry}");
            }
            Kernel::cross(rx)?
        }
    };
    Ok(kernel)
}

fn detect<I>(
    image: &Image<I>,
    kernel: &Kernel,
    kind: ExtremumKind,
    args: &DetectArgs,
) -> Result<Image<u8>, CliError>
where
    I: HistogramPixel + TryFrom<u32>,
{
    let mut filter = ExtremaFilter::<I, u8>::new(kind)
        .with_foreground_value(args.foreground)
        .with_background_value(args.background)
        .with_flat_to_foreground(!args.no_flat);
    if let Some(threshold) = args.threshold {
        let threshold = I::try_from(threshold).map_err(|_| {
            CliError::InvalidArgument(format!(
                "threshold {threshold} is out of range for the input image"
            ))
        })?;
        filter.set_threshold(threshold);
    }
    Ok(filter.apply(image, kernel)?)
}

/// Run one subcommand
pub fn run(command: &Command) -> Result<(), CliError> {
    let (kind, args) = match command {
        Command::Minima(args) => (ExtremumKind::Minima, args),
        Command::Maxima(args) => (ExtremumKind::Maxima, args),
    };

    let kernel = build_kernel(args)?;
    let input = extrema_io::read_image(&args.input)?;
    let (width, height, _) = input.dimensions();
    info!(
        "read {}: {}x{} at {} bits",
        args.input.display(),
        width,
        height,
        input.bit_depth()
    );

    let result = match &input {
        GrayImage::Gray8(image) => detect(image, &kernel, kind, args)?,
        GrayImage::Gray16(image) => detect(image, &kernel, kind, args)?,
    };
    info!(
        "{} pixels marked as {:?}",
        result.count_value(args.foreground),
        kind
    );

    let format = ImageFormat::from_path(&args.output);
    extrema_io::write_image(&GrayImage::Gray8(result), &args.output, format)?;
    info!("wrote {}", args.output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::args::Cli;
    use clap::Parser;
    use std::path::PathBuf;

    fn detect_args(shape: Shape, radius: u32, radius_y: Option<u32>) -> DetectArgs {
        DetectArgs {
            input: PathBuf::from("in.pgm"),
            output: PathBuf::from("out.pgm"),
            radius,
            radius_y,
            shape,
            no_flat: false,
            threshold: None,
            foreground: 255,
            background: 0,
        }
    }

    #[test]
    fn test_build_kernel() {
        let kernel = build_kernel(&detect_args(Shape::Box, 2, Some(1))).unwrap();
        assert_eq!(kernel.radius(), [2, 1, 0]);
        assert_eq!(kernel.hit_count(), 15);

        let kernel = build_kernel(&detect_args(Shape::Ball, 2, None)).unwrap();
        assert_eq!(kernel.hit_count(), 13);

        let kernel = build_kernel(&detect_args(Shape::Cross, 1, Some(4))).unwrap();
        assert_eq!(kernel.hit_count(), 5);
    }

    #[test]
    fn test_huge_radius_is_an_error() {
        assert!(matches!(
            build_kernel(&detect_args(Shape::Box, 5_000_000, None)),
            Err(CliError::Morph(MorphError::InvalidKernel(_)))
        ));
    }

    #[test]
    fn test_threshold_out_of_range() {
        let image = Image::new(3, 3, 0u8).unwrap();
        let kernel = Kernel::box_2d(1, 1).unwrap();
        let mut args = detect_args(Shape::Box, 1, None);
        args.threshold = Some(300);
        assert!(matches!(
            detect(&image, &kernel, ExtremumKind::Minima, &args),
            Err(CliError::InvalidArgument(_))
        ));

        let wide = Image::new(3, 3, 0u16).unwrap();
        assert!(detect(&wide, &kernel, ExtremumKind::Minima, &args).is_ok());
    }

    #[test]
    fn test_run_end_to_end() {
        let dir = std::env::temp_dir().join(format!("extrema-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let input = dir.join("pits.pgm");
        let output = dir.join("pits_minima.png");

        let image = Image::from_rows(&[
            [1000u16, 1000, 1000, 1000, 1000],
            [1000, 10, 1000, 1000, 1000],
            [1000, 1000, 1000, 1000, 1000],
            [1000, 1000, 1000, 20, 1000],
        ])
        .unwrap();
        extrema_io::write_image(&GrayImage::Gray16(image), &input, ImageFormat::Pnm).unwrap();

        let cli = Cli::try_parse_from([
            "extrema".as_ref(),
            "minima".as_ref(),
            input.as_os_str(),
            output.as_os_str(),
            "--no-flat".as_ref(),
        ])
        .unwrap();
        run(&cli.command).unwrap();

        let GrayImage::Gray8(result) = extrema_io::read_image(&output).unwrap() else {
            panic!("expected 8-bit output");
        };
        assert_eq!(result.dimensions(), (5, 4, 1));
        assert_eq!(result.get_pixel(1, 1), Some(255));
        assert_eq!(result.get_pixel(3, 3), Some(255));
        assert_eq!(result.count_value(255), 2);

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
