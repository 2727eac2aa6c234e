use crate::letters::LetterMap;

/// Relative frequency of each letter in English text.
pub const FREQUENCIES: LetterMap<f64> = LetterMap::new([
    0.08167, 0.01492, 0.02782, 0.04253, 0.12702, 0.02228, 0.02015, 0.06094, 0.06966, 0.00153,
    0.00772, 0.04025, 0.02406, 0.06749, 0.07507, 0.01929, 0.00095, 0.05987, 0.06327, 0.09056,
    0.02758, 0.00978, 0.02360, 0.00150, 0.01974, 0.00074,
]);

/// Score for a word that uses up every remaining letter.
pub const EXHAUSTED: f64 = 1_000_000.0;

/// How natural the surplus letters left over after playing a word look.
///
/// Leftovers whose proportions track English letter frequencies score
/// higher, and smaller leftovers score higher than larger ones. Deficit
/// slots are not surplus and count as zero.
pub fn letter_goodness(after: &LetterMap<i32>) -> f64 {
    let surplus = || after.iter().map(|&count| count.max(0));
    let remain: i32 = surplus().sum();
    if remain == 0 {
        return EXHAUSTED;
    }
    let remain = f64::from(remain);
    let score: f64 = surplus()
        .zip(FREQUENCIES.iter())
        .map(|(count, &freq)| (1.0 - f64::from(count) / remain / freq).powi(4))
        .sum();
    1.0 / (score + 0.0001) / remain
}
