use super::*;

#[test]
fn channels_saturate_at_255() {
    assert_eq!(
        mix(Rgb8::new(200, 10, 0), Rgb8::new(100, 250, 255)),
        Rgb8::new(255, 255, 255)
    );
    assert_eq!(
        mix(Rgb8::new(100, 20, 3), Rgb8::new(100, 30, 4)),
        Rgb8::new(200, 50, 7)
    );
}

#[test]
fn matches_clamped_sum_for_every_channel_pair() {
    for a in 0..=255u8 {
        for b in (0..=255u8).step_by(5) {
            let out = mix(Rgb8::new(a, 0, 0), Rgb8::new(b, 0, 0));
            assert_eq!(u16::from(out.r), (u16::from(a) + u16::from(b)).min(255));
        }
    }
}

#[test]
fn black_is_identity_and_mix_commutes() {
    let samples = [
        Rgb8::new(0, 0, 0),
        Rgb8::new(12, 200, 99),
        Rgb8::new(255, 1, 128),
        Rgb8::WHITE,
    ];
    for &c in &samples {
        assert_eq!(mix(Rgb8::BLACK, c), c);
        assert_eq!(mix(c, Rgb8::WHITE), Rgb8::WHITE);
        for &d in &samples {
            assert_eq!(mix(c, d), mix(d, c));
        }
    }
}

#[test]
fn primaries_make_secondaries() {
    assert_eq!(mix(Rgb8::RED, Rgb8::GREEN), Rgb8::new(255, 255, 0));
    assert_eq!(mix(Rgb8::GREEN, Rgb8::BLUE), Rgb8::new(0, 255, 255));
    assert_eq!(mix(Rgb8::RED, Rgb8::BLUE), Rgb8::new(255, 0, 255));
}
