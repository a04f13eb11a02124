//! Frame capture to PNG.
//!
//! The finished swapchain texture is copied into a mappable buffer before it
//! is presented, read back row by row (wgpu pads each row to 256 bytes), and
//! converted to RGBA.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{SystemTime, UNIX_EPOCH};

use image::RgbaImage;

use crate::error::ViewerError;
use crate::gpu::render_context::RenderContext;

const BYTES_PER_PIXEL: u32 = 4;

/// Row pitch wgpu requires for a texture-to-buffer copy of `width` pixels.
#[must_use]
pub fn padded_bytes_per_row(width: u32) -> u32 {
    let unpadded = width * BYTES_PER_PIXEL;
    let align = wgpu::COPY_BYTES_PER_ROW_ALIGNMENT;
    unpadded.div_ceil(align) * align
}

/// Drop the per-row padding from a readback buffer.
#[must_use]
pub fn unpad_rows(data: &[u8], width: u32, height: u32, padded_row: u32) -> Vec<u8> {
    let row = (width * BYTES_PER_PIXEL) as usize;
    data.chunks(padded_row as usize)
        .take(height as usize)
        .flat_map(|chunk| &chunk[..row])
        .copied()
        .collect()
}

/// Convert tightly packed pixels in place to RGBA. `bgra` swaps the red and
/// blue channels; `with_alpha == false` forces every pixel opaque.
pub fn to_rgba(pixels: &mut [u8], bgra: bool, with_alpha: bool) {
    for px in pixels.chunks_exact_mut(BYTES_PER_PIXEL as usize) {
        if bgra {
            px.swap(0, 2);
        }
        if !with_alpha {
            px[3] = u8::MAX;
        }
    }
}

/// `screenshot_<unix-millis>.png`.
#[must_use]
pub fn file_name(unix_millis: u128) -> String {
    format!("screenshot_{unix_millis}.png")
}

fn channel_order(format: wgpu::TextureFormat) -> Result<bool, ViewerError> {
    match format {
        wgpu::TextureFormat::Bgra8Unorm | wgpu::TextureFormat::Bgra8UnormSrgb => Ok(true),
        wgpu::TextureFormat::Rgba8Unorm | wgpu::TextureFormat::Rgba8UnormSrgb => Ok(false),
        other => Err(ViewerError::Screenshot(format!(
            "unsupported surface format {other:?}"
        ))),
    }
}

/// Copy `texture` back to the CPU as an RGBA image.
///
/// Must run after the frame's commands are submitted and before the surface
/// texture is presented.
///
/// # Errors
///
/// [`ViewerError::Screenshot`] if the surface can't be copied from, the
/// format isn't 8-bit RGBA/BGRA, or the buffer fails to map.
pub fn capture(
    ctx: &RenderContext,
    texture: &wgpu::Texture,
    with_alpha: bool,
) -> Result<RgbaImage, ViewerError> {
    if !ctx.supports_readback {
        return Err(ViewerError::Screenshot(
            "surface does not support readback".into(),
        ));
    }
    let bgra = channel_order(texture.format())?;
    let (width, height) = (texture.width(), texture.height());
    let padded_row = padded_bytes_per_row(width);

    let buffer = ctx.device.create_buffer(&wgpu::BufferDescriptor {
        label: Some("Screenshot Readback Buffer"),
        size: u64::from(padded_row) * u64::from(height),
        usage: wgpu::BufferUsages::COPY_DST | wgpu::BufferUsages::MAP_READ,
        mapped_at_creation: false,
    });

    let mut encoder = ctx
        .device
        .create_command_encoder(&wgpu::CommandEncoderDescriptor {
            label: Some("Screenshot Encoder"),
        });
    encoder.copy_texture_to_buffer(
        wgpu::TexelCopyTextureInfo {
            texture,
            mip_level: 0,
            origin: wgpu::Origin3d::ZERO,
            aspect: wgpu::TextureAspect::All,
        },
        wgpu::TexelCopyBufferInfo {
            buffer: &buffer,
            layout: wgpu::TexelCopyBufferLayout {
                offset: 0,
                bytes_per_row: Some(padded_row),
                rows_per_image: Some(height),
            },
        },
        wgpu::Extent3d {
            width,
            height,
            depth_or_array_layers: 1,
        },
    );
    let _ = ctx.queue.submit(std::iter::once(encoder.finish()));

    let slice = buffer.slice(..);
    let (tx, rx) = mpsc::channel();
    slice.map_async(wgpu::MapMode::Read, move |result| {
        let _ = tx.send(result);
    });
    let mapped = loop {
        if let Err(e) = ctx.device.poll(wgpu::PollType::Poll) {
            return Err(ViewerError::Screenshot(format!("device poll failed: {e}")));
        }
        match rx.try_recv() {
            Ok(result) => break result,
            Err(mpsc::TryRecvError::Empty) => std::thread::yield_now(),
            Err(mpsc::TryRecvError::Disconnected) => {
                return Err(ViewerError::Screenshot("map callback dropped".into()));
            }
        }
    };
    mapped.map_err(|e| ViewerError::Screenshot(format!("buffer map failed: {e}")))?;

    let mut pixels = unpad_rows(&slice.get_mapped_range(), width, height, padded_row);
    buffer.unmap();
    to_rgba(&mut pixels, bgra, with_alpha);

    RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| ViewerError::Screenshot("pixel buffer size mismatch".into()))
}

/// Write `image` into `dir` (created if missing) under a timestamped name.
///
/// # Errors
///
/// [`ViewerError::Io`] if the directory can't be created,
/// [`ViewerError::Screenshot`] if PNG encoding fails.
pub fn save(image: &RgbaImage, dir: &Path) -> Result<PathBuf, ViewerError> {
    std::fs::create_dir_all(dir)?;
    let millis = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis())
        .unwrap_or_default();
    let path = dir.join(file_name(millis));
    image
        .save_with_format(&path, image::ImageFormat::Png)
        .map_err(|e| ViewerError::Screenshot(format!("{}: {e}", path.display())))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_aligned_to_256() {
        assert_eq!(padded_bytes_per_row(1), 256);
        assert_eq!(padded_bytes_per_row(64), 256);
        assert_eq!(padded_bytes_per_row(65), 512);
    }

    #[test]
    fn padding_is_stripped() {
        // 2x2 image, rows padded to 12 bytes.
        let data = [
            1, 2, 3, 4, 5, 6, 7, 8, 0, 0, 0, 0, //
            9, 10, 11, 12, 13, 14, 15, 16, 0, 0, 0, 0,
        ];
        let pixels = unpad_rows(&data, 2, 2, 12);
        assert_eq!(pixels, (1..=16).collect::<Vec<u8>>());
    }

    #[test]
    fn bgra_is_swizzled() {
        let mut px = [10, 20, 30, 40];
        to_rgba(&mut px, true, true);
        assert_eq!(px, [30, 20, 10, 40]);
    }

    #[test]
    fn alpha_can_be_forced_opaque() {
        let mut px = [10, 20, 30, 40, 1, 2, 3, 0];
        to_rgba(&mut px, false, false);
        assert_eq!(px, [10, 20, 30, 255, 1, 2, 3, 255]);
    }

    #[test]
    fn unsupported_formats_are_rejected() {
        assert!(channel_order(wgpu::TextureFormat::Bgra8UnormSrgb).unwrap());
        assert!(!channel_order(wgpu::TextureFormat::Rgba8Unorm).unwrap());
        assert!(matches!(
            channel_order(wgpu::TextureFormat::Rgba16Float),
            Err(ViewerError::Screenshot(_))
        ));
    }

    #[test]
    fn save_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let image = RgbaImage::from_pixel(3, 2, image::Rgba([1, 2, 3, 255]));
        let path = save(&image, &dir.path().join("shots")).unwrap();
        let name = path.file_name().unwrap().to_str().unwrap();
        assert!(name.starts_with("screenshot_") && name.ends_with(".png"));
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded, image);
    }
}
