use serde::Serialize;

/// A fixed studio offering. The catalog is compiled in; there is no
/// admin surface for editing it.
#[derive(Debug, Serialize, Clone)]
pub struct Package {
    pub id: &'static str,
    pub name: &'static str,
    pub price: i64,
    pub duration_min: i32,
}

pub const PACKAGES: &[Package] = &[
    Package { id: "solo", name: "Solo Package", price: 299, duration_min: 15 },
    Package { id: "basic", name: "Basic Package", price: 399, duration_min: 25 },
    Package { id: "transfer", name: "Just Transfer", price: 549, duration_min: 30 },
    Package { id: "standard", name: "Standard Package", price: 699, duration_min: 45 },
    Package { id: "family", name: "Family Package", price: 1249, duration_min: 50 },
    Package { id: "barkada", name: "Barkada Package", price: 1949, duration_min: 50 },
    Package { id: "birthday", name: "Birthday Package", price: 599, duration_min: 45 },
];

/// Extra minutes -> extra price. Only these five keys exist; anything
/// else is a caller error surfaced as a validation failure upstream.
pub const EXTENSION_RATES: &[(i32, i64)] = &[
    (0, 0),
    (15, 150),
    (30, 300),
    (45, 450),
    (60, 600),
];

pub fn find_package(id: &str) -> Option<&'static Package> {
    PACKAGES.iter().find(|p| p.id == id)
}

pub fn extension_price(minutes: i32) -> Option<i64> {
    EXTENSION_RATES.iter()
        .find(|(m, _)| *m == minutes)
        .map(|(_, price)| *price)
}

/// Display name for emails and summaries; unknown ids fall back to the
/// raw id so a stale booking row still renders.
pub fn package_display_name(id: &str) -> String {
    find_package(id).map(|p| p.name.to_string()).unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_id() {
        let basic = find_package("basic").expect("basic package missing");
        assert_eq!(basic.name, "Basic Package");
        assert_eq!(basic.price, 399);
        assert_eq!(basic.duration_min, 25);

        assert!(find_package("deluxe").is_none());
    }

    #[test]
    fn test_extension_rates() {
        assert_eq!(extension_price(0), Some(0));
        assert_eq!(extension_price(30), Some(300));
        assert_eq!(extension_price(60), Some(600));
        assert_eq!(extension_price(20), None);
        assert_eq!(extension_price(-15), None);
    }
}
