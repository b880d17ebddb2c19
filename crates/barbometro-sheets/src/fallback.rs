//! Built-in records served when neither remote source is reachable.

use barbometro_core::{sort_by_name, Restaurant};

struct Seed {
    name: &'static str,
    locality: &'static str,
    cuisine: &'static str,
    visited: bool,
    rating: f64,
    price: &'static str,
    link: &'static str,
    curator_rating: f64,
    notes: &'static str,
    latitude: f64,
    longitude: f64,
}

const SEEDS: [Seed; 6] = [
    Seed {
        name: "Tasca do Porto",
        locality: "Porto",
        cuisine: "Portuguesa",
        visited: true,
        rating: 4.7,
        price: "20€",
        link: "https://instagram.com/tascadoporto",
        curator_rating: 4.5,
        notes: "Experimentar o bacalhau à brás",
        latitude: 41.149_451_2,
        longitude: -8.610_788_4,
    },
    Seed {
        name: "Cantinho do Avillez",
        locality: "Lisboa",
        cuisine: "Portuguesa Contemporânea",
        visited: true,
        rating: 4.5,
        price: "35€",
        link: "https://cantinhodoavillez.pt",
        curator_rating: 4.8,
        notes: "Reservar com antecedência",
        latitude: 38.709_764_3,
        longitude: -9.139_702_6,
    },
    Seed {
        name: "Pizzaria Bella Napoli",
        locality: "Braga",
        cuisine: "Italiana",
        visited: false,
        rating: 4.2,
        price: "15€",
        link: "https://instagram.com/bellanapoli",
        curator_rating: 0.0,
        notes: "Recomendado por amigos",
        latitude: 41.545_448_6,
        longitude: -8.426_507,
    },
    Seed {
        name: "Sushi House",
        locality: "Lisboa",
        cuisine: "Japonesa",
        visited: true,
        rating: 4.6,
        price: "30€",
        link: "https://sushihouse.pt",
        curator_rating: 4.3,
        notes: "Excelente relação qualidade/preço",
        latitude: 38.722_325_2,
        longitude: -9.139_329_5,
    },
    Seed {
        name: "Taberna Algarvia",
        locality: "Faro",
        cuisine: "Portuguesa",
        visited: true,
        rating: 4.3,
        price: "25€",
        link: "https://instagram.com/tabernaalgarvia",
        curator_rating: 4.0,
        notes: "Ótimos pratos de peixe fresco",
        latitude: 37.014_609_9,
        longitude: -7.933_093_3,
    },
    Seed {
        name: "Veggie Delight",
        locality: "Coimbra",
        cuisine: "Vegetariana",
        visited: false,
        rating: 4.4,
        price: "18€",
        link: "https://veggiedelight.pt",
        curator_rating: 0.0,
        notes: "Boas opções vegan",
        latitude: 40.210_980_1,
        longitude: -8.429_205_7,
    },
];

/// The static data set, sorted by name.
#[must_use]
pub fn static_restaurants() -> Vec<Restaurant> {
    let records: Vec<Restaurant> = SEEDS
        .iter()
        .zip(1u32..)
        .map(|(seed, id)| Restaurant {
            id,
            name: seed.name.to_owned(),
            locality: seed.locality.to_owned(),
            gps_coordinates: Some(format!("{},{}", seed.latitude, seed.longitude)),
            maps_link: format!("https://goo.gl/maps/examplelink{id}"),
            cuisine_types: seed.cuisine.to_owned(),
            visited: seed.visited,
            rating: seed.rating,
            quality_price_ratio: 0.0,
            price_per_person: seed.price.to_owned(),
            website_or_instagram: Some(seed.link.to_owned()),
            curator_rating: Some(seed.curator_rating),
            notes: Some(seed.notes.to_owned()),
            latitude: seed.latitude,
            longitude: seed.longitude,
        })
        .collect();
    sort_by_name(&records)
}
