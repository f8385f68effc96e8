use rand::seq::index;
use tracing::debug;

use crate::cache::DataCache;
use crate::error::CacheResult;
use crate::{Array, Field, Kind};

/// Returns a random, order-preserving subset of `data`.
///
/// `samples` wins over `percentage` when both are given; callers wanting a
/// percentage of a specific count should convert it themselves. Asking for at
/// least as many samples as there are entries, or for neither, returns all of
/// `data`.
///
/// The chosen positions are cached under [`Kind::Downsample`], keyed by the
/// input length and sample count, so repeated calls select the same rows
/// until that kind is reset.
pub fn downsample<T: Clone>(
    data: &[T],
    percentage: Option<f64>,
    samples: Option<usize>,
    cache: &dyn DataCache,
) -> CacheResult<Vec<T>> {
    let len = data.len();
    let target = match (samples, percentage) {
        (Some(n), _) => n,
        (None, Some(p)) if p.is_finite() => (len as f64 * p.max(0.0) / 100.0).floor() as usize,
        _ => return Ok(data.to_vec()),
    };
    if target >= len {
        return Ok(data.to_vec());
    }
    if target == 0 {
        return Ok(Vec::new());
    }

    let name = format!("downsample:{len}:{target}");
    let cached = cache
        .find_hash_array(Field::Name, &name, Kind::Downsample)?
        .and_then(|e| e.data.as_indices().map(<[usize]>::to_vec))
        .filter(|idx| idx.len() == target && idx.iter().all(|&i| i < len));

    let indices = match cached {
        Some(idx) => idx,
        None => {
            let mut idx = index::sample(&mut rand::thread_rng(), len, target).into_vec();
            idx.sort_unstable();
            cache.hash_array(&name, Array::Indices(idx.clone()), Kind::Downsample)?;
            debug!(len, target, "datacache: new downsample selection");
            idx
        }
    };

    Ok(indices.into_iter().map(|i| data[i].clone()).collect())
}
