use std::path::PathBuf;
use clap::Parser;
use anyhow::{bail, Result};
use image::RgbaImage;
use color_server::{Catalog, ColorRecord, Rgb};

#[derive(Parser, Debug)]
#[command(about="Check that a PNG is a uniform, opaque color swatch", version)]
struct Args {
    #[arg(long)] png: PathBuf,
    /// Optional catalog + name to compare the fill against.
    #[arg(long, requires = "name")] colors: Option<PathBuf>,
    #[arg(long, requires = "colors")] name: Option<String>,
}

#[derive(Debug, PartialEq)]
struct Report { width: u32, height: u32, fill: Option<[u8; 4]>, distinct_pixels: usize }

fn inspect(img: &RgbaImage) -> Report {
    let first = img.pixels().next().map(|p| p.0);
    let distinct = img.pixels().filter(|p| Some(p.0) != first).count();
    Report { width: img.width(), height: img.height(), fill: if distinct == 0 { first } else { None }, distinct_pixels: distinct }
}

/// Fails unless the swatch is a uniform, opaque fill of `expected`'s RGB.
fn check_against(report: &Report, expected: &ColorRecord) -> Result<()> {
    let Rgb { r, g, b } = expected.rgb;
    if report.fill != Some([r, g, b, 255]) { bail!("swatch does not match {} ({})", expected.name, expected.hex_code); }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    let img = image::open(&args.png)?;
    let report = inspect(&img.to_rgba8());
    println!("Swatch: {} {}x{}", args.png.display(), report.width, report.height);
    match report.fill {
        Some([r, g, b, a]) => println!("Uniform fill: rgba({r}, {g}, {b}, {a}) opaque={}", a == 255),
        None => println!("Not uniform: {} pixels differ from the first", report.distinct_pixels),
    }

    if let (Some(colors), Some(name)) = (&args.colors, &args.name) {
        let catalog = Catalog::load(colors)?;
        let Some(expected) = catalog.find_by_name(name) else { bail!("color {name:?} not in catalog"); };
        check_against(&report, expected)?;
        println!("Matches catalog entry {} ({})", expected.name, expected.hex_code);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use color_server::render_swatch;

    #[test]
    fn uniform_swatch_report() {
        let report = inspect(&render_swatch(&Rgb::new(1, 2, 3)));
        assert_eq!(report, Report { width: 200, height: 200, fill: Some([1, 2, 3, 255]), distinct_pixels: 0 });
    }

    #[test]
    fn non_uniform_detected() {
        let mut img = render_swatch(&Rgb::new(0, 0, 0));
        img.put_pixel(10, 10, image::Rgba([9, 9, 9, 255]));
        img.put_pixel(20, 20, image::Rgba([0, 0, 0, 0]));
        let report = inspect(&img);
        assert_eq!(report.fill, None);
        assert_eq!(report.distinct_pixels, 2);
    }

    fn goldenrod() -> ColorRecord {
        ColorRecord { name: "goldenrod".into(), hex_code: "#DAA520".into(), rgb: Rgb::new(218, 165, 32) }
    }

    #[test]
    fn check_accepts_matching_swatch() {
        let report = inspect(&render_swatch(&Rgb::new(218, 165, 32)));
        assert!(check_against(&report, &goldenrod()).is_ok());
    }

    #[test]
    fn check_rejects_other_color() {
        let report = inspect(&render_swatch(&Rgb::new(218, 165, 33)));
        let err = check_against(&report, &goldenrod()).unwrap_err();
        assert!(err.to_string().contains("goldenrod (#DAA520)"), "{err}");
    }

    #[test]
    fn check_rejects_translucent_or_mixed_swatch() {
        let translucent = RgbaImage::from_pixel(200, 200, image::Rgba([218, 165, 32, 128]));
        assert!(check_against(&inspect(&translucent), &goldenrod()).is_err());

        let mut mixed = render_swatch(&Rgb::new(218, 165, 32));
        mixed.put_pixel(0, 0, image::Rgba([0, 0, 0, 255]));
        assert!(check_against(&inspect(&mixed), &goldenrod()).is_err());
    }
}
