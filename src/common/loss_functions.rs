/// Returns the fraction of `predictions` that differ from `target`.
/// Returns `0` for empty inputs.
///
/// ```
/// use cartree::zero_one_loss;
/// let target = ["a", "b", "b", "a"];
/// let predictions = ["a", "b", "a", "a"];
/// assert_eq!(zero_one_loss(&target, &predictions), 0.25);
/// ```
pub fn zero_one_loss<T, P>(target: &[T], predictions: &[P]) -> f64
    where T: AsRef<str>,
          P: AsRef<str>,
{
    let n_items = predictions.len();

    assert_eq!(n_items, target.len());
    if n_items == 0 {
        return 0f64;
    }

    let n_miss = target.iter()
        .zip(predictions)
        .filter(|(y, p)| y.as_ref() != p.as_ref())
        .count();

    n_miss as f64 / n_items as f64
}
