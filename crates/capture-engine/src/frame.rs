//! Frame buffers handed between capture, vision and preview.

use image::RgbImage;

/// One RGB camera frame.
pub type Frame = RgbImage;

/// Top-left `size`x`size` square of `frame`, clamped to the frame bounds.
///
/// The hand is expected in this region; the rest of the image is ignored.
pub fn crop_square(frame: &Frame, size: u32) -> Frame {
    let width = size.min(frame.width());
    let height = size.min(frame.height());
    image::imageops::crop_imm(frame, 0, 0, width, height).to_image()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_crop_keeps_top_left() {
        let mut frame = Frame::new(640, 480);
        frame.put_pixel(0, 0, Rgb([1, 2, 3]));
        frame.put_pixel(500, 10, Rgb([9, 9, 9]));

        let cropped = crop_square(&frame, 420);
        assert_eq!(cropped.dimensions(), (420, 420));
        assert_eq!(cropped.get_pixel(0, 0), &Rgb([1, 2, 3]));
    }

    #[test]
    fn test_crop_clamps_to_small_frames() {
        let frame = Frame::new(320, 240);
        assert_eq!(crop_square(&frame, 420).dimensions(), (320, 240));
    }
}
