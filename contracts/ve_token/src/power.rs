use crate::storage::SCALE;

/// Calculate the voting power carried by a lock
///
/// Formula: voting_power = amount × multiplier / SCALE
///
/// Example:
/// - amount: 100 (scaled)
/// - multiplier: 0.2 (scaled)
/// - voting_power: 100 × 0.2 = 20 (scaled)
pub fn calculate_voting_power(amount: i128, multiplier: i128) -> Option<i128> {
    amount.checked_mul(multiplier)?.checked_div(SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_multiplier() {
        let amount = 100 * SCALE;
        let multiplier = 2 * SCALE / 10; // 0.2

        let power = calculate_voting_power(amount, multiplier).unwrap();
        assert_eq!(power, 20 * SCALE);
    }

    #[test]
    fn test_unit_multiplier() {
        let amount = 1234 * SCALE;

        let power = calculate_voting_power(amount, SCALE).unwrap();
        assert_eq!(power, amount);
    }

    #[test]
    fn test_zero_amount() {
        let power = calculate_voting_power(0, SCALE).unwrap();
        assert_eq!(power, 0);
    }

    #[test]
    fn test_overflow_detected() {
        let power = calculate_voting_power(i128::MAX, 2 * SCALE);
        assert_eq!(power, None);
    }
}
