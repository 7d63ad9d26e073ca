// ---------------------------------------------------------------------------
// Column names
// ---------------------------------------------------------------------------

pub const WAREHOUSE_BLOCK: &str = "Warehouse_block";
pub const MODE_OF_SHIPMENT: &str = "Mode_of_Shipment";
pub const CUSTOMER_RATING: &str = "Customer_rating";
pub const WEIGHT_IN_GMS: &str = "Weight_in_gms";

/// The four columns every data source must provide, in header order.
pub const REQUIRED_COLUMNS: [&str; 4] =
    [WAREHOUSE_BLOCK, MODE_OF_SHIPMENT, CUSTOMER_RATING, WEIGHT_IN_GMS];

// ---------------------------------------------------------------------------
// ShipmentRecord – one row of the source table
// ---------------------------------------------------------------------------

/// A single shipment (one row of the source table).
#[derive(Debug, Clone, PartialEq)]
pub struct ShipmentRecord {
    pub warehouse_block: String,
    pub mode_of_shipment: String,
    /// Customer satisfaction score, usually 1–5.
    pub customer_rating: i64,
    pub weight_in_gms: f64,
}

// ---------------------------------------------------------------------------
// ShipmentDataset – the complete loaded table, column-oriented
// ---------------------------------------------------------------------------

/// The loaded dataset. Columns are stored side by side and always have the
/// same length; the dataset is read-only once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ShipmentDataset {
    warehouse_block: Vec<String>,
    mode_of_shipment: Vec<String>,
    customer_rating: Vec<i64>,
    weight_in_gms: Vec<f64>,
}

impl ShipmentDataset {
    /// Build the column store from rows, keeping source order.
    pub fn from_records(records: impl IntoIterator<Item = ShipmentRecord>) -> Self {
        let mut dataset = ShipmentDataset::default();
        for rec in records {
            dataset.warehouse_block.push(rec.warehouse_block);
            dataset.mode_of_shipment.push(rec.mode_of_shipment);
            dataset.customer_rating.push(rec.customer_rating);
            dataset.weight_in_gms.push(rec.weight_in_gms);
        }
        dataset
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.warehouse_block.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.warehouse_block.is_empty()
    }

    pub fn warehouse_block(&self) -> &[String] {
        &self.warehouse_block
    }

    pub fn mode_of_shipment(&self) -> &[String] {
        &self.mode_of_shipment
    }

    pub fn customer_rating(&self) -> &[i64] {
        &self.customer_rating
    }

    pub fn weight_in_gms(&self) -> &[f64] {
        &self.weight_in_gms
    }

    /// Reassemble row `index`, if it exists.
    pub fn record(&self, index: usize) -> Option<ShipmentRecord> {
        Some(ShipmentRecord {
            warehouse_block: self.warehouse_block.get(index)?.clone(),
            mode_of_shipment: self.mode_of_shipment.get(index)?.clone(),
            customer_rating: *self.customer_rating.get(index)?,
            weight_in_gms: *self.weight_in_gms.get(index)?,
        })
    }

    /// Iterate over all rows in source order.
    pub fn records(&self) -> impl Iterator<Item = ShipmentRecord> + '_ {
        (0..self.len()).filter_map(|i| self.record(i))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rec(block: &str, mode: &str, rating: i64, weight: f64) -> ShipmentRecord {
        ShipmentRecord {
            warehouse_block: block.into(),
            mode_of_shipment: mode.into(),
            customer_rating: rating,
            weight_in_gms: weight,
        }
    }

    #[test]
    fn columns_line_up_with_rows() {
        let ds = ShipmentDataset::from_records(vec![
            rec("A", "Ship", 4, 1200.0),
            rec("F", "Road", 2, 3050.5),
        ]);
        assert_eq!(ds.len(), 2);
        assert_eq!(ds.warehouse_block(), ["A", "F"]);
        assert_eq!(ds.mode_of_shipment(), ["Ship", "Road"]);
        assert_eq!(ds.customer_rating(), [4, 2]);
        assert_eq!(ds.weight_in_gms(), [1200.0, 3050.5]);
        assert_eq!(ds.record(1), Some(rec("F", "Road", 2, 3050.5)));
        assert_eq!(ds.record(2), None);
    }

    #[test]
    fn records_round_trip_in_order() {
        let rows = vec![rec("B", "Flight", 1, 10.0), rec("C", "Ship", 5, 20.0)];
        let ds = ShipmentDataset::from_records(rows.clone());
        assert_eq!(ds.records().collect::<Vec<_>>(), rows);
    }

    #[test]
    fn empty_dataset() {
        let ds = ShipmentDataset::default();
        assert!(ds.is_empty());
        assert_eq!(ds.records().count(), 0);
    }
}
