use std::cell::RefCell;
use std::rc::Rc;

/// Source of uniform values in `[0, 1)` for decorative parameters.
pub trait RandomSource {
    fn next_unit(&mut self) -> f64;
}

pub type SharedRandom = Rc<RefCell<dyn RandomSource>>;

pub fn shared<R: RandomSource + 'static>(rng: R) -> SharedRandom {
    Rc::new(RefCell::new(rng))
}

pub fn splitmix64(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9e3779b97f4a7c15);
    let mut z = value;
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58476d1ce4e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d049bb133111eb);
    z ^ (z >> 31)
}

#[derive(Clone, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }
}

impl RandomSource for SplitMix64 {
    fn next_unit(&mut self) -> f64 {
        self.state = self.state.wrapping_add(0x9e3779b97f4a7c15);
        let mixed = splitmix64(self.state);
        let top = mixed >> 11;
        top as f64 / ((1u64 << 53) as f64)
    }
}

/// Replays a fixed list of values, wrapping around at the end.
#[derive(Clone, Debug)]
pub struct SequenceSource {
    values: Vec<f64>,
    cursor: usize,
}

impl SequenceSource {
    pub fn new(values: Vec<f64>) -> Self {
        let values = values
            .into_iter()
            .map(|value| value.clamp(0.0, 0.999_999_999))
            .collect();
        Self { values, cursor: 0 }
    }

    pub fn constant(value: f64) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_unit(&mut self) -> f64 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor = self.cursor.wrapping_add(1);
        value
    }
}

pub fn range<R: RandomSource + ?Sized>(rng: &mut R, min: f64, max: f64) -> f64 {
    min + (max - min) * rng.next_unit()
}

pub fn chance<R: RandomSource + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.next_unit() < probability
}

pub fn pick<'a, T, R: RandomSource + ?Sized>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        return None;
    }
    let index = (rng.next_unit() * items.len() as f64) as usize;
    items.get(index.min(items.len() - 1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn splitmix_is_deterministic_and_in_unit_range() {
        let mut a = SplitMix64::new(42);
        let mut b = SplitMix64::new(42);
        for _ in 0..1000 {
            let value = a.next_unit();
            assert_eq!(value, b.next_unit());
            assert!((0.0..1.0).contains(&value));
        }
    }

    #[test]
    fn pick_covers_last_item() {
        let mut rng = SequenceSource::constant(0.999);
        assert_eq!(pick(&mut rng, &[1, 2, 3]), Some(&3));
        let empty: [u8; 0] = [];
        assert_eq!(pick(&mut rng, &empty), None);
    }
}
