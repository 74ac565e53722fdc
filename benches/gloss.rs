use criterion::{black_box, criterion_group, criterion_main, Criterion};
use gloss_rs::{GlossEngine, LexiconAnnotator};

const SENTENCE: &str = "I am reading a book while the cats were running in the big house";

fn bench_gloss(c: &mut Criterion) {
    let engine = GlossEngine::default();
    let lexicon = LexiconAnnotator::embedded();

    c.bench_function("gloss_fallback", |b| {
        b.iter(|| engine.gloss(black_box(SENTENCE), None))
    });

    c.bench_function("gloss_lexicon", |b| {
        b.iter(|| engine.gloss(black_box(SENTENCE), Some(&lexicon)))
    });
}

criterion_group!(benches, bench_gloss);
criterion_main!(benches);
