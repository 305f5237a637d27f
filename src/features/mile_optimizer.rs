// Mile optimizer: which payment method earns the most miles at a given shop

/// Shops with a known best payment method
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shop {
    Yoshinoya,
    Yayoiken,
    Rairaitei,
    TrainTicket,
    Other,
}

/// Suggested payment method and what it earns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaymentStrategy {
    pub method: &'static str,
    /// Miles per 10,000 yen
    pub rate_bp: u64,
    pub miles: u64,
}

impl PaymentStrategy {
    /// "3.5%"
    pub fn rate_label(&self) -> String {
        let percent = self.rate_bp as f64 / 100.0;
        let label = format!("{:.2}", percent);
        let label = label.trim_end_matches('0').trim_end_matches('.');
        format!("{}%", label)
    }
}

impl Shop {
    pub fn label(&self) -> &'static str {
        match self {
            Shop::Yoshinoya => "Yoshinoya",
            Shop::Yayoiken => "Yayoiken",
            Shop::Rairaitei => "Rairaitei",
            Shop::TrainTicket => "Train ticket",
            Shop::Other => "Other",
        }
    }

    fn method(&self) -> (&'static str, u64) {
        match self {
            Shop::Yoshinoya => ("Olive (smartphone touch)", 350),
            Shop::Yayoiken | Shop::Rairaitei => ("Rakuten Pay", 75),
            Shop::TrainTicket => ("ICOCA / VISA (discounted)", 50),
            Shop::Other => ("Main card", 50),
        }
    }
}

/// Best payment method for `amount` yen at `shop`; miles are floored
pub fn strategy(shop: Shop, amount: u64) -> PaymentStrategy {
    let (method, rate_bp) = shop.method();
    PaymentStrategy {
        method,
        rate_bp,
        miles: amount * rate_bp / 10_000,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_yoshinoya_olive() {
        let s = strategy(Shop::Yoshinoya, 1000);
        assert_eq!(s.method, "Olive (smartphone touch)");
        assert_eq!(s.miles, 35);
        assert_eq!(s.rate_label(), "3.5%");
    }

    #[test]
    fn test_miles_are_floored() {
        // 999 * 0.0075 = 7.4925
        assert_eq!(strategy(Shop::Yayoiken, 999).miles, 7);
        assert_eq!(strategy(Shop::Rairaitei, 999).miles, 7);
        // 199 * 0.005 = 0.995
        assert_eq!(strategy(Shop::Other, 199).miles, 0);
        assert_eq!(strategy(Shop::TrainTicket, 12_345).miles, 61);
    }

    #[test]
    fn test_rate_labels() {
        assert_eq!(strategy(Shop::Yayoiken, 0).rate_label(), "0.75%");
        assert_eq!(strategy(Shop::Other, 0).rate_label(), "0.5%");
    }
}
