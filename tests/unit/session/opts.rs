use super::*;

fn env(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |key| {
        pairs
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| (*v).to_owned())
    }
}

#[test]
fn defaults() {
    let o = SessionOpts::default();
    assert_eq!(o.sparkle_seed, None);
    assert_eq!(o.max_canvas_size, 2048);
    assert_eq!(o.max_pattern_vertices, 4_000_000);
    assert_eq!(o.clear_rgba, None);
}

#[test]
fn env_overrides_apply() {
    let o = SessionOpts::default().with_env_overrides(env(&[
        ("HYPNO_SPARKLE_SEED", "42"),
        ("HYPNO_MAX_PATTERN_VERTICES", " 1000 "),
    ]));
    assert_eq!(o.sparkle_seed, Some(42));
    assert_eq!(o.max_pattern_vertices, 1000);
}

#[test]
fn unparsable_env_is_ignored() {
    let o = SessionOpts::default().with_env_overrides(env(&[
        ("HYPNO_SPARKLE_SEED", "soon"),
        ("HYPNO_MAX_PATTERN_VERTICES", "0"),
    ]));
    assert_eq!(o, SessionOpts::default());
}

#[test]
fn builders_feed_render_opts() {
    let o = SessionOpts::default()
        .with_sparkle_seed(Some(1))
        .with_clear_rgba(Some([1, 2, 3, 4]));
    assert_eq!(o.sparkle_seed, Some(1));
    let r = o.render_opts();
    assert_eq!(r.clear_rgba, Some([1, 2, 3, 4]));
    assert_eq!(r.max_pattern_vertices, 4_000_000);
}
