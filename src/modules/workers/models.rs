use serde::{Deserialize, Serialize};

/// Geographic coordinates, embedded in worker and user records. Pure value
/// type, never independently persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// Minimal worker record used by the legacy add-worker flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Worker {
    pub img_url: String,
    pub name_of_worker: String,
}

/// Full worker profile with trade, location, and rate.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkerProfile {
    pub name: String,
    pub work_name: String,
    pub img_url: String,
    pub coordinates_of_worker: Coordinates,
    pub cost_per_hour: i64,
}

/// A client of the platform. Declared for the booking flow; no route
/// consumes it yet.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub name_of_user: String,
    pub coordinates_of_user: Coordinates,
    pub adress: String,
    pub recent_booked_worker: Vec<Worker>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn worker_profile_uses_the_documented_wire_names() {
        let profile: WorkerProfile = serde_json::from_value(json!({
            "name": "Jo",
            "workName": "plumbing",
            "imgUrl": "x",
            "coordinatesOfWorker": { "latitude": 1.0, "longitude": 2.0 },
            "costPerHour": 50
        }))
        .unwrap();

        assert_eq!(profile.work_name, "plumbing");
        assert_eq!(profile.cost_per_hour, 50);
        assert_eq!(
            profile.coordinates_of_worker,
            Coordinates {
                latitude: 1.0,
                longitude: 2.0
            }
        );
    }

    #[test]
    fn missing_fields_fail_to_decode() {
        let result: Result<WorkerProfile, _> = serde_json::from_value(json!({
            "name": "Jo",
            "workName": "plumbing"
        }));
        assert!(result.is_err());
    }
}
