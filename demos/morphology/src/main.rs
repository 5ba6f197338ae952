use argh::FromArgs;
use rand::{rngs::StdRng, Rng, SeedableRng};

use binmorph::{
    image::{Binary, BinaryImage, ImageSize, BLACK, WHITE},
    imgproc::morphology::{self, Kernel, KernelShape},
};

#[derive(FromArgs)]
/// Apply a binary morphological operation to a synthetic noisy frame
struct Args {
    /// image width (default: 32)
    #[argh(option, default = "32")]
    width: usize,

    /// image height (default: 16)
    #[argh(option, default = "16")]
    height: usize,

    /// probability of flipping a pixel (default: 0.05)
    #[argh(option, short = 'n', default = "0.05")]
    noise: f64,

    /// random seed (default: 0)
    #[argh(option, default = "0")]
    seed: u64,

    /// kernel size (default: 3)
    #[argh(option, short = 's', default = "3")]
    kernel_size: usize,

    /// kernel shape: rect, cross, circle (default: rect)
    #[argh(option, short = 'k', default = "String::from(\"rect\")")]
    kernel_shape: String,

    /// operation: erode, dilate, open, close (default: open)
    #[argh(option, short = 'o', default = "String::from(\"open\")")]
    operation: String,

    /// use a white background instead of black
    #[argh(switch)]
    white_background: bool,
}

/// A filled rectangle in the middle of the frame with salt-and-pepper noise.
fn synthetic_frame(
    size: ImageSize,
    noise: f64,
    seed: u64,
    background: Binary,
) -> Result<BinaryImage, Box<dyn std::error::Error>> {
    let mut rng = StdRng::seed_from_u64(seed);
    let (x0, x1) = (size.width / 4, size.width * 3 / 4);
    let (y0, y1) = (size.height / 4, size.height * 3 / 4);

    let mut image = BinaryImage::from_size_val(size, background)?;
    for y in 0..size.height {
        for x in 0..size.width {
            let inside = (x0..x1).contains(&x) && (y0..y1).contains(&y);
            let value = if inside { !background } else { background };
            let flip = rng.random_bool(noise.clamp(0.0, 1.0));
            image.set_pixel(x, y, value ^ flip)?;
        }
    }
    Ok(image)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let background = if args.white_background { WHITE } else { BLACK };
    let size = ImageSize {
        width: args.width,
        height: args.height,
    };

    let shape = match args.kernel_shape.as_str() {
        "cross" => KernelShape::Cross {
            size: args.kernel_size,
        },
        "circle" => KernelShape::Circle {
            size: args.kernel_size,
        },
        _ => KernelShape::Rect {
            width: args.kernel_size,
            height: args.kernel_size,
        },
    };
    let mut kernel = Kernel::new(shape)?;
    if background == WHITE {
        kernel = kernel.inverted();
    }

    let src = synthetic_frame(size, args.noise, args.seed, background)?;
    let mut dst = BinaryImage::from_size_val(size, background)?;

    log::info!(
        "{} {} with a {}x{} {} kernel",
        args.operation,
        size,
        kernel.width(),
        kernel.height(),
        args.kernel_shape
    );

    match args.operation.as_str() {
        "erode" => morphology::erode(&src, &mut dst, &kernel, background)?,
        "dilate" => morphology::dilate(&src, &mut dst, &kernel, background)?,
        "close" => morphology::close(&src, &mut dst, &kernel, background)?,
        _ => morphology::open(&src, &mut dst, &kernel, background)?,
    }

    let foreground = !background;
    println!("source ({} foreground pixels):", src.count(foreground));
    print!("{}", src.to_ascii(foreground));
    println!("{} ({} foreground pixels):", args.operation, dst.count(foreground));
    print!("{}", dst.to_ascii(foreground));

    Ok(())
}
