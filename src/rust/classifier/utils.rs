use ndarray::{Array1, ArrayView1};

pub(crate) fn normalize_vector(vec: &Array1<f64>) -> Array1<f64> {
    let norm: f64 = vec.iter().map(|&x| x * x).sum::<f64>().sqrt();
    if norm > 1e-10 {
        vec / norm
    } else {
        Array1::zeros(vec.len())
    }
}

/// Index of the largest value; the first index wins on ties.
pub(crate) fn argmax(values: ArrayView1<'_, f64>) -> Option<usize> {
    values
        .iter()
        .enumerate()
        .fold(None, |best: Option<(usize, f64)>, (i, &v)| match best {
            Some((_, b)) if v <= b => best,
            _ => Some((i, v)),
        })
        .map(|(i, _)| i)
}
