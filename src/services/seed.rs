use crate::models::{GeoPoint, NewBranch};
use crate::services::repository::{BranchRepository, RepositoryError};

/// Demo registry covering the main Colombian cities
pub fn demo_branches() -> Vec<NewBranch> {
    let rows: [(&str, &str, f64, f64, f64); 10] = [
        ("Banco de Bogotá - Centro", "Calle 72 # 10-07, Bogotá", 4.7110, -74.0721, 4.5),
        ("Banco de Bogotá - Chapinero", "Carrera 7 # 26-20, Bogotá", 4.6682, -74.0537, 4.2),
        ("Banco de Bogotá - Usaquén", "Calle 119 # 7-14, Bogotá", 4.6975, -74.0337, 4.0),
        ("Banco de Medellín - Centro", "Carrera 64C # 78-580, Medellín", 6.2442, -75.5812, 4.3),
        ("Banco de Medellín - El Poblado", "Carrera 43A # 6-15, Medellín", 6.2088, -75.5677, 4.7),
        ("Banco de Cali - Centro", "Calle 9 # 37-00, Cali", 3.4516, -76.5320, 4.1),
        ("Banco de Cali - Granada", "Carrera 66 # 10-15, Cali", 3.4280, -76.5432, 4.4),
        ("Banco de Barranquilla - Centro", "Calle 44 # 44-66, Barranquilla", 10.9685, -74.7813, 3.9),
        ("Banco de Cartagena - Centro Histórico", "Calle de la Media Luna # 10-89, Cartagena", 10.3932, -75.4792, 4.6),
        ("Banco de Bucaramanga - Cabecera", "Calle 45 # 26-50, Bucaramanga", 7.1253, -73.1367, 4.0),
    ];

    rows.iter()
        .map(|(name, address, lat, lon, rating)| NewBranch {
            name: name.to_string(),
            address: address.to_string(),
            location: GeoPoint::new(*lat, *lon),
            rating: Some(*rating),
        })
        .collect()
}

/// Insert the demo branches when the registry is empty.
///
/// Returns the number of branches created (0 if the registry already had data).
pub async fn seed_repository(repo: &dyn BranchRepository) -> Result<usize, RepositoryError> {
    if !repo.find_all().await?.is_empty() {
        tracing::info!("Registry already populated, skipping demo seed");
        return Ok(0);
    }

    let branches = demo_branches();
    let count = branches.len();
    for branch in branches {
        repo.create(branch).await?;
    }

    tracing::info!("Seeded {} demo branches", count);
    Ok(count)
}
