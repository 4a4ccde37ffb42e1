use glam::Vec2;
use viewer_core::{Texture, WrapMode};

fn gradient(width: u32, height: u32) -> Texture {
    let pixels = (0..width * height)
        .flat_map(|i| [(i % 256) as u8, 0, 0, 255])
        .collect();
    Texture::from_rgba8(width, height, pixels).unwrap()
}

#[test]
fn texture_within_limit_is_left_alone() {
    let tex = gradient(16, 8);
    assert!(tex.downscaled(16).is_none());
    assert!(tex.downscaled(1024).is_none());
}

#[test]
fn oversized_texture_shrinks_to_limit_keeping_aspect() {
    let mut tex = gradient(64, 16).with_source("big.png");
    tex.set_tiling(Vec2::splat(20.0));

    let small = tex.downscaled(16).unwrap();
    assert_eq!((small.width, small.height), (16, 4));
    assert_eq!(small.pixels.len(), 16 * 4 * 4);
    assert_eq!(small.source.as_deref(), Some("big.png"));
    assert_eq!(small.wrap, WrapMode::Repeat);
    assert_eq!(small.repeat, Vec2::splat(20.0));
    assert!(small.pixels.chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn thin_texture_keeps_at_least_one_texel() {
    let tex = gradient(100, 1);
    let small = tex.downscaled(10).unwrap();
    assert_eq!((small.width, small.height), (10, 1));
}
