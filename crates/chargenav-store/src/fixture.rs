//! Built-in station list around central Ankara

use chargenav_core::models::{Coordinate, Station};

/// Sample stations used when no feed is configured
pub fn sample_stations() -> Vec<Station> {
    vec![
        Station::new("1", "Ankara Merkez Şarj İstasyonu", Coordinate::new(39.925533, 32.866287))
            .with_address("Kızılay Meydanı, Çankaya/Ankara")
            .with_dc(4, 2)
            .with_power(150.0, &["CCS", "CHAdeMO"]),
        Station::new("2", "AVM Şarj Noktası", Coordinate::new(39.919966, 32.854867))
            .with_address("Bahçelievler, Ankara")
            .with_ac(2, 0)
            .with_power(50.0, &["Type2"]),
        Station::new("3", "Üniversite Şarj İstasyonu", Coordinate::new(39.930000, 32.870000))
            .with_address("Cebeci, Ankara")
            .with_dc(2, 1)
            .with_ac(2, 1)
            .with_power(100.0, &["CCS", "Type2"]),
        Station::new("4", "Ulus Şarj Noktası", Coordinate::new(39.941442, 32.854412))
            .with_address("Ulus, Altındağ/Ankara")
            .with_dc(2, 0)
            .with_faults(1, 1)
            .with_power(60.0, &["CCS"]),
        Station::new("5", "Eskişehir Yolu Hızlı Şarj", Coordinate::new(39.889200, 32.700900))
            .with_address("Eskişehir Yolu, Yenimahalle/Ankara")
            .with_dc(6, 4)
            .with_power(180.0, &["CCS", "CHAdeMO"]),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_stations_are_valid() {
        let stations = sample_stations();
        assert_eq!(stations.len(), 5);
        for station in &stations {
            station.validate().unwrap();
        }
    }
}
