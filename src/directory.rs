use once_cell::sync::Lazy;

use crate::models::Venue;

/// Read-only venue catalog. Ratings never mutate it.
pub trait VenueDirectory: Send + Sync {
    fn get_venue(&self, venue_id: &str) -> Option<Venue>;

    fn list_venues(&self) -> Vec<Venue>;
}

fn venue(
    id: &str,
    name: &str,
    address: &str,
    baseline: (f64, u64),
    price_range: &str,
    open_now: bool,
    specialties: &[&str],
) -> Venue {
    Venue {
        id: id.into(),
        name: name.into(),
        address: address.into(),
        baseline_average: baseline.0,
        baseline_count: baseline.1,
        price_range: price_range.into(),
        open_now,
        specialties: specialties.iter().map(|s| s.to_string()).collect(),
    }
}

static SEED_VENUES: Lazy<Vec<Venue>> = Lazy::new(|| {
    vec![
        venue(
            "1",
            "Café Central",
            "Rua Augusta 125, Chiado",
            (4.8, 324),
            "€€",
            true,
            &["Espresso", "Pastéis"],
        ),
        venue(
            "2",
            "The Coffee House",
            "Travessa do Carmo 8, Chiado",
            (4.6, 198),
            "€€€",
            true,
            &["Specialty Coffee", "Artisan Roasts"],
        ),
        venue(
            "3",
            "Padaria Nacional",
            "Rua da Betesga 10, Rossio",
            (4.4, 412),
            "€",
            false,
            &["Traditional", "Galão"],
        ),
        venue(
            "4",
            "Dear Breakfast",
            "Rua Nova do Carvalho 20, Cais do Sodré",
            (4.7, 267),
            "€€",
            true,
            &["Brunch", "Flat White"],
        ),
        venue(
            "5",
            "Comoba",
            "Avenida da Liberdade 244, Avenidas Novas",
            (4.5, 156),
            "€€€",
            true,
            &["Third Wave", "Single Origin"],
        ),
        venue(
            "6",
            "Mesa de Loja",
            "Rua da Escola Politécnica 27, Príncipe Real",
            (4.3, 89),
            "€€",
            true,
            &["Cortado", "Local Roasters"],
        ),
    ]
});

/// Directory backed by a fixed list, the built-in Lisbon listing by default.
#[derive(Debug, Clone)]
pub struct SeedDirectory {
    venues: Vec<Venue>,
}

impl SeedDirectory {
    pub fn new(venues: Vec<Venue>) -> Self {
        Self { venues }
    }
}

impl Default for SeedDirectory {
    fn default() -> Self {
        Self::new(SEED_VENUES.clone())
    }
}

impl VenueDirectory for SeedDirectory {
    fn get_venue(&self, venue_id: &str) -> Option<Venue> {
        self.venues.iter().find(|v| v.id == venue_id).cloned()
    }

    fn list_venues(&self) -> Vec<Venue> {
        self.venues.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seed_listing_has_six_cafes() {
        let directory = SeedDirectory::default();
        assert_eq!(directory.list_venues().len(), 6);

        let padaria = directory.get_venue("3").unwrap();
        assert_eq!(padaria.name, "Padaria Nacional");
        assert_eq!(padaria.baseline_count, 412);
        assert!(!padaria.open_now);

        assert!(directory.get_venue("missing").is_none());
    }
}
