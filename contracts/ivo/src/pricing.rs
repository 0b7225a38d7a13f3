use crate::storage::SCALE;

/// Calculate the exact payment owed for a purchase
///
/// Formula: cost = amount × price / SCALE
///
/// Example:
/// - amount: 1000 (scaled)
/// - price: 0.001 (scaled)
/// - cost: 1000 × 0.001 = 1 (scaled)
pub fn calculate_cost(amount: i128, price: i128) -> Option<i128> {
    amount.checked_mul(price)?.checked_div(SCALE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fractional_price() {
        let amount = 1000 * SCALE;
        let price = SCALE / 1000; // 0.001

        let cost = calculate_cost(amount, price).unwrap();
        assert_eq!(cost, 1 * SCALE);
    }

    #[test]
    fn test_unit_price() {
        let amount = 250 * SCALE;

        let cost = calculate_cost(amount, SCALE).unwrap();
        assert_eq!(cost, amount);
    }

    #[test]
    fn test_zero_price() {
        let cost = calculate_cost(1000 * SCALE, 0).unwrap();
        assert_eq!(cost, 0);
    }

    #[test]
    fn test_overflow_detected() {
        let cost = calculate_cost(i128::MAX, 2 * SCALE);
        assert_eq!(cost, None);
    }
}
