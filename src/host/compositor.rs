use super::{CardPage, Page};
use crate::cards::Registry;
use crate::core::{Canvas, DrawOp, Rgba};
use crate::math::{hsv_to_rgb, Rect};

const BACKGROUND: Rgba = [10, 12, 16, 255];
const CARD_ALPHA: u8 = 40;

/// Paint the visible part of the page: card backgrounds, then each scene's
/// last frame stretched over its container. `target` is in device pixels.
pub fn compose(page: &CardPage, registry: &Registry, target: &mut Canvas) {
    let scale = page.device_pixel_ratio();
    target.execute(&DrawOp::Clear(BACKGROUND));

    let (tw, th) = target.dimensions();
    let screen = Rect::new(0.0, 0.0, tw as f32, th as f32);
    let to_device = |r: Rect| Rect::new(r.left * scale, r.top * scale, r.width * scale, r.height * scale);

    for (i, card) in page.cards().into_iter().enumerate() {
        let rect = to_device(page.bounding_rect(card));
        if rect.intersection(&screen).is_none() {
            continue;
        }
        // Golden-ratio hue walk gives neighbouring cards distinct tints
        let hue = (i as f32 * 0.618_034) % 1.0;
        let [r, g, b] = hsv_to_rgb(hue, 0.25, 0.9);
        target.execute(&DrawOp::Rect {
            x: rect.left.round() as i32,
            y: rect.top.round() as i32,
            width: rect.width.max(0.0).round() as u32,
            height: rect.height.max(0.0).round() as u32,
            color: [(r * 255.0) as u8, (g * 255.0) as u8, (b * 255.0) as u8, CARD_ALPHA],
        });
    }

    for (_, record) in registry.iter() {
        let Some(frame) = record.renderer.output() else {
            continue;
        };
        let rect = to_device(page.bounding_rect(record.container));
        if rect.intersection(&screen).is_none() {
            continue;
        }
        target.blit_scaled(
            frame,
            rect.left.round() as i32,
            rect.top.round() as i32,
            rect.width.max(0.0).round() as u32,
            rect.height.max(0.0).round() as u32,
        );
    }
}
