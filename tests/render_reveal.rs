use liquid_reveal::{Canvas, RevealConfig, RevealFrame, RingConfig, SourceImage, Stage, Stimulus};

fn mix64(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

fn digest_u64(bytes: &[u8]) -> u64 {
    let mut state = 0x9E37_79B9_7F4A_7C15u64;
    for chunk in bytes.chunks(8) {
        let mut v = 0u64;
        for (i, &b) in chunk.iter().enumerate() {
            v |= (b as u64) << (i * 8);
        }
        state = mix64(state ^ v);
    }
    state
}

fn gradient(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba(image::RgbaImage::from_fn(w, h, |x, y| {
        image::Rgba([(x * 4) as u8, (y * 4) as u8, 128, 255])
    }))
}

fn ready_frame(seed: u64) -> RevealFrame {
    let cfg = RevealConfig {
        seed,
        ..Default::default()
    };
    let mut frame = RevealFrame::seeded(Canvas::new(48, 48).unwrap(), cfg).unwrap();
    frame.set_image(gradient(48, 48));
    frame
}

fn alpha_coverage(data: &[u8]) -> usize {
    data.chunks_exact(4).filter(|px| px[3] > 0).count()
}

#[test]
fn same_seed_renders_identical_frames() {
    let mut a = ready_frame(3);
    let mut b = ready_frame(3);
    for t in 0..30 {
        if t == 10 {
            a.on_stimulus(Stimulus::Scroll);
            b.on_stimulus(Stimulus::Scroll);
        }
        let fa = a.tick().unwrap().unwrap();
        let fb = b.tick().unwrap().unwrap();
        assert_eq!(digest_u64(&fa.data), digest_u64(&fb.data));
    }
}

#[test]
fn reveal_keeps_image_inside_blob_only() {
    let mut frame = ready_frame(8);
    let out = frame.tick().unwrap().unwrap();

    let px = |x: u32, y: u32| {
        let i = ((y * out.width + x) * 4) as usize;
        [out.data[i], out.data[i + 1], out.data[i + 2], out.data[i + 3]]
    };
    assert_eq!(px(24, 24), [96, 96, 128, 255]);
    assert_eq!(px(0, 0), [0, 0, 0, 0]);
    assert_eq!(px(47, 0), [0, 0, 0, 0]);

    let covered = alpha_coverage(&out.data);
    assert!(covered > 0 && covered < out.data.len() / 4);
}

#[test]
fn animation_changes_the_mask_over_time() {
    let mut frame = ready_frame(12);
    let first = frame.tick().unwrap().unwrap();
    for _ in 0..89 {
        frame.tick().unwrap();
    }
    let later = frame.tick().unwrap().unwrap();
    assert_ne!(digest_u64(&first.data), digest_u64(&later.data));
}

#[test]
fn smaller_radius_scale_reveals_less() {
    let canvas = Canvas::new(48, 48).unwrap();
    let render = |radius_scale: f64| {
        let cfg = RevealConfig {
            ring: RingConfig {
                radius_scale,
                ..Default::default()
            },
            ..Default::default()
        };
        let mut frame = RevealFrame::seeded(canvas, cfg).unwrap();
        frame.set_image(gradient(48, 48));
        alpha_coverage(&frame.render_current().unwrap().unwrap().data)
    };
    assert!(render(0.2) < render(0.45));
}

#[test]
fn stage_resize_keeps_frames_rendering() {
    let mut stage = Stage::new();
    stage.push(ready_frame(1));
    stage.push(ready_frame(2));
    stage.resize_all(Canvas::new(30, 20).unwrap()).unwrap();
    for out in stage.tick_all().unwrap() {
        let out = out.unwrap();
        assert_eq!((out.width, out.height), (30, 20));
        assert_eq!(out.data.len(), 30 * 20 * 4);
    }
}
