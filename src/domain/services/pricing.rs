use serde::Serialize;
use super::catalog::{self, Package};

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Quote {
    pub total_price: i64,
    pub downpayment: i64,
    pub duration_total: i32,
}

/// Pure pricing: total, 50%-rounded-up downpayment, and total session
/// length for a package plus extension. Returns None for an extension
/// value outside the published rates.
pub fn quote(package: &Package, extension_min: i32) -> Option<Quote> {
    let extension_price = catalog::extension_price(extension_min)?;
    let total_price = package.price + extension_price;
    Some(Quote {
        total_price,
        downpayment: (total_price + 1) / 2,
        duration_total: package.duration_min + extension_min,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::services::catalog::find_package;

    #[test]
    fn test_downpayment_is_ceiling_of_half() {
        // 299 -> 150, not 149
        let solo = find_package("solo").unwrap();
        let q = quote(solo, 0).unwrap();
        assert_eq!(q.total_price, 299);
        assert_eq!(q.downpayment, 150);

        // Even total halves exactly
        let barkada = find_package("barkada").unwrap();
        let q = quote(barkada, 15).unwrap();
        assert_eq!(q.total_price, 2099);
        assert_eq!(q.downpayment, 1050);
    }

    #[test]
    fn test_all_combinations_hold_invariants() {
        for pkg in crate::domain::services::catalog::PACKAGES {
            for (mins, price) in crate::domain::services::catalog::EXTENSION_RATES {
                let q = quote(pkg, *mins).unwrap();
                assert_eq!(q.total_price, pkg.price + price);
                assert_eq!(q.downpayment, (q.total_price + 1) / 2);
                assert_eq!(q.duration_total, pkg.duration_min + mins);
            }
        }
    }

    #[test]
    fn test_invalid_extension_rejected() {
        let basic = find_package("basic").unwrap();
        assert!(quote(basic, 20).is_none());
        assert!(quote(basic, 90).is_none());
    }
}
