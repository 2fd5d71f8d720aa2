use criterion::{black_box, criterion_group, criterion_main, Criterion};
use specialist::classifier::vectorizer::tokenize;
use specialist::{classify, sample_dataset, ModelArtifacts, ModelBuilder, SpecialistPredictor};

const SHORT_TEXT: &str = "my tooth hurts";
const MEDIUM_TEXT: &str = "I have severe chest pain and difficulty breathing, \
     along with a mild fever that started two days ago.";
const LONG_TEXT: &str = "For the past few weeks I have been waking up tired and sore. \
     The soreness started in my lower back and slowly moved up towards my shoulders, \
     and lately I also notice a dull ache behind my eyes in the evening.\n\n\
     Over-the-counter painkillers help for a few hours but the symptoms always return. \
     I sleep poorly, my appetite is lower than usual, and I feel anxious about work. \
     Nobody else in my family has similar complaints.";

fn setup_benchmark_model() -> ModelArtifacts {
    ModelBuilder::new()
        .with_dataset(&sample_dataset())
        .unwrap()
        .build()
        .unwrap()
        .artifacts
}

fn bench_tokenization(c: &mut Criterion) {
    let mut group = c.benchmark_group("Tokenization");

    // Configure sampling
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    group.bench_function("short_text", |b| b.iter(|| tokenize(black_box(SHORT_TEXT))));
    group.bench_function("medium_text", |b| b.iter(|| tokenize(black_box(MEDIUM_TEXT))));
    group.bench_function("long_text", |b| b.iter(|| tokenize(black_box(LONG_TEXT))));

    group.finish();
}

fn bench_prediction(c: &mut Criterion) {
    let mut group = c.benchmark_group("Prediction");
    group.sample_size(50);
    group.warm_up_time(std::time::Duration::from_secs(1));

    let model = setup_benchmark_model();
    for (name, text) in [("short", SHORT_TEXT), ("medium", MEDIUM_TEXT), ("long", LONG_TEXT)] {
        group.bench_function(format!("keywords_{}", name), |b| {
            b.iter(|| classify(black_box(text)))
        });
        group.bench_function(format!("model_{}", name), |b| {
            b.iter(|| model.predict(black_box(text)).unwrap())
        });
    }

    group.finish();
}

fn bench_training(c: &mut Criterion) {
    let mut group = c.benchmark_group("Training");
    group.sample_size(20);
    group.warm_up_time(std::time::Duration::from_secs(1));

    // Scaling with vocabulary cap
    for &max_features in &[10, 50, 100] {
        group.bench_function(format!("max_features_{}", max_features), |b| {
            b.iter(|| {
                ModelBuilder::new()
                    .with_max_features(black_box(max_features))
                    .with_dataset(&sample_dataset())
                    .unwrap()
                    .build()
                    .unwrap()
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tokenization, bench_prediction, bench_training);
criterion_main!(benches);
