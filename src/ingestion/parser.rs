//! CSV row parsing. Turns the raw bytes of an uploaded document into a lazy
//! sequence of [`NormalizedRow`]s for one product group.
//!
//! Headers are trimmed before matching and values are uppercased at this
//! boundary, so downstream matching is exact-case. The only validation done
//! here is structural (readable CSV, numeric quantity and price); enumerated
//! domains are checked at merge time where the group schema is needed anyway.

use crate::catalog::{hex_for_color, GroupSchema, IdentityField, ProductGroup};
use crate::entities::product::ColorSpec;
use crate::errors::ServiceError;
use csv::{ReaderBuilder, StringRecord, Trim};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

/// Identity-field values carried by one CSV row, after defaulting and
/// uppercasing. Fields the group schema does not declare stay `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IdentityValues {
    pub category: Option<String>,
    pub category_image_url: Option<String>,
    pub sub_category: Option<String>,
    pub sub_category_image_url: Option<String>,
    pub gender: Option<String>,
    pub product_type: Option<String>,
    pub product_type_image_url: Option<String>,
    pub fit: Option<String>,
    pub neckline: Option<String>,
    pub sleeves: Option<String>,
    pub fabric: Option<String>,
}

impl IdentityValues {
    pub fn get(&self, field: IdentityField) -> Option<&str> {
        match field {
            IdentityField::Category => self.category.as_deref(),
            IdentityField::SubCategory => self.sub_category.as_deref(),
            IdentityField::Gender => self.gender.as_deref(),
            IdentityField::ProductType => self.product_type.as_deref(),
            IdentityField::Fit => self.fit.as_deref(),
            IdentityField::Neckline => self.neckline.as_deref(),
            IdentityField::Sleeves => self.sleeves.as_deref(),
            IdentityField::Fabric => self.fabric.as_deref(),
        }
    }

    fn set(&mut self, field: IdentityField, value: Option<String>) {
        match field {
            IdentityField::Category => self.category = value,
            IdentityField::SubCategory => self.sub_category = value,
            IdentityField::Gender => self.gender = value,
            IdentityField::ProductType => self.product_type = value,
            IdentityField::Fit => self.fit = value,
            IdentityField::Neckline => self.neckline = value,
            IdentityField::Sleeves => self.sleeves = value,
            IdentityField::Fabric => self.fabric = value,
        }
    }
}

/// One data row of an upload, normalized to the group's schema.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedRow {
    /// 1-based line in the source document, for error reporting.
    pub line: u64,
    pub group: ProductGroup,
    pub group_image_url: Option<String>,
    pub identity: IdentityValues,
    pub color: ColorSpec,
    pub size: String,
    pub quantity: i32,
    /// Meaningful on first insert only; merges into an existing product
    /// never reprice it.
    pub unit_price: Option<Decimal>,
    pub product_details: Option<String>,
    pub image_urls: Vec<String>,
}

/// Lazy reader over the data rows of one uploaded CSV document. Holds no
/// state across rows beyond the open byte stream; a fresh reader over the
/// same bytes restarts the sequence.
pub struct RowReader<'a> {
    group: ProductGroup,
    schema: &'static GroupSchema,
    reader: csv::Reader<&'a [u8]>,
    columns: HashMap<String, usize>,
}

impl<'a> RowReader<'a> {
    pub fn new(bytes: &'a [u8], group: ProductGroup) -> Result<Self, ServiceError> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(Trim::All)
            .from_reader(bytes);

        let headers = reader.headers().map_err(|e| ServiceError::RowParse {
            line: 1,
            reason: format!("unreadable CSV header: {e}"),
        })?;
        let columns = headers
            .iter()
            .enumerate()
            .map(|(index, name)| (name.to_string(), index))
            .collect();

        Ok(Self {
            group,
            schema: group.schema(),
            reader,
            columns,
        })
    }

    /// Trimmed, non-empty cell value for a named column.
    fn cell<'r>(&self, record: &'r StringRecord, column: &str) -> Option<&'r str> {
        self.columns
            .get(column)
            .and_then(|&index| record.get(index))
            .map(str::trim)
            .filter(|value| !value.is_empty())
    }

    fn normalize(&self, record: &StringRecord, line: u64) -> Result<NormalizedRow, ServiceError> {
        let mut identity = IdentityValues::default();
        for spec in self.schema.identity_fields {
            let value = self
                .cell(record, spec.field.column_name())
                .map(|v| v.to_uppercase())
                .or_else(|| spec.default.map(str::to_string));
            identity.set(spec.field, value);
        }
        identity.category_image_url = self.cell(record, "categoryImageUrl").map(str::to_string);
        identity.sub_category_image_url =
            self.cell(record, "subCategoryImageUrl").map(str::to_string);
        identity.product_type_image_url =
            self.cell(record, "productTypeImageUrl").map(str::to_string);

        // A blank or missing color is not an error: the group's default
        // color label stands in for single-color lines.
        let color_name = self
            .cell(record, "variantColor")
            .map(|v| v.to_uppercase())
            .unwrap_or_else(|| self.schema.default_color.to_string());
        let color = ColorSpec {
            hex_code: hex_for_color(&color_name).map(str::to_string),
            name: color_name,
        };

        let size = self
            .cell(record, "variantSize")
            .map(|v| v.to_uppercase())
            .unwrap_or_default();

        let raw_quantity = self
            .cell(record, "variantQuantity")
            .ok_or_else(|| ServiceError::RowParse {
                line,
                reason: "missing variantQuantity".to_string(),
            })?;
        let quantity = raw_quantity
            .parse::<i32>()
            .ok()
            .filter(|q| *q >= 0)
            .ok_or_else(|| ServiceError::RowParse {
                line,
                reason: format!("quantity '{raw_quantity}' is not a non-negative integer"),
            })?;

        let unit_price = match self.cell(record, "price") {
            Some(raw) => Some(Decimal::from_str(raw).map_err(|_| ServiceError::RowParse {
                line,
                reason: format!("price '{raw}' is not a number"),
            })?),
            None => None,
        };

        let image_urls = self
            .cell(record, "variantImages")
            .map(|raw| {
                raw.split(';')
                    .map(str::trim)
                    .filter(|url| !url.is_empty())
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();

        Ok(NormalizedRow {
            line,
            group: self.group,
            group_image_url: self.cell(record, "groupImageUrl").map(str::to_string),
            identity,
            color,
            size,
            quantity,
            unit_price,
            product_details: self.cell(record, "productDetails").map(str::to_string),
            image_urls,
        })
    }
}

impl Iterator for RowReader<'_> {
    type Item = Result<NormalizedRow, ServiceError>;

    fn next(&mut self) -> Option<Self::Item> {
        let mut record = StringRecord::new();
        match self.reader.read_record(&mut record) {
            Ok(false) => None,
            Ok(true) => {
                let line = record.position().map(|p| p.line()).unwrap_or_default();
                Some(self.normalize(&record, line))
            }
            Err(e) => {
                let line = e.position().map(|p| p.line()).unwrap_or_default();
                Some(Err(ServiceError::RowParse {
                    line,
                    reason: format!("unreadable CSV row: {e}"),
                }))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use rust_decimal_macros::dec;

    const HEAL_HEADER: &str = "groupName,groupImageUrl,categoryName,categoryImageUrl,subCategoryName,subCategoryImageUrl,gender,productType,productTypeImageUrl,fit,sleeves,fabric,price,productDetails,variantColor,variantSize,variantQuantity,variantImages";

    fn heal_csv(rows: &[&str]) -> Vec<u8> {
        let mut doc = String::from(HEAL_HEADER);
        for row in rows {
            doc.push('\n');
            doc.push_str(row);
        }
        doc.into_bytes()
    }

    fn parse_one(csv: &[u8]) -> NormalizedRow {
        let mut reader = RowReader::new(csv, ProductGroup::Heal).unwrap();
        let row = reader.next().expect("one row").expect("row parses");
        assert!(reader.next().is_none());
        row
    }

    #[test]
    fn normalizes_identity_fields_and_uppercases() {
        let csv = heal_csv(&[
            "HEAL,https://img/g.png,scrubs,https://img/c.png,nurse scrub sets,https://img/sc.png,women,top,https://img/pt.png,CLASSIC,SHORT SLEEVES,POLY COTTON,499.50,Breathable scrub top,black,m,10,https://img/1.jpg;https://img/2.jpg",
        ]);
        let row = parse_one(&csv);

        assert_eq!(row.identity.category.as_deref(), Some("SCRUBS"));
        assert_eq!(row.identity.sub_category.as_deref(), Some("NURSE SCRUB SETS"));
        assert_eq!(row.identity.gender.as_deref(), Some("WOMEN"));
        assert_eq!(row.identity.product_type.as_deref(), Some("TOP"));
        assert_eq!(row.color.name, "BLACK");
        assert_eq!(row.color.hex_code.as_deref(), Some("#000000"));
        assert_eq!(row.size, "M");
        assert_eq!(row.quantity, 10);
        assert_eq!(row.unit_price, Some(dec!(499.50)));
        assert_eq!(row.image_urls.len(), 2);
        assert_eq!(row.product_details.as_deref(), Some("Breathable scrub top"));
    }

    #[test]
    fn header_names_are_trimmed_before_matching() {
        let csv = format!(
            "{},\n{}",
            HEAL_HEADER.replace("variantQuantity", "  variantQuantity  "),
            "HEAL,,COATS,,MEDICAL COATS,,UNISEX,SHORT COATS,,,,LAB COATS,750,,BLACK,S,5,"
        );
        // flexible reader tolerates the trailing blank column in the header
        let row = parse_one(csv.as_bytes());
        assert_eq!(row.quantity, 5);
    }

    #[test]
    fn blank_color_falls_back_to_group_default() {
        let csv = heal_csv(&[
            "HEAL,,COATS,,MEDICAL COATS,,UNISEX,SHORT COATS,,,,LAB COATS,750,,,S,5,",
        ]);
        let row = parse_one(&csv);
        assert_eq!(row.color.name, "COATS COLOR");
        assert_eq!(row.color.hex_code, None);
    }

    #[test]
    fn schema_defaults_fill_missing_fields() {
        // SHIELD CSVs may omit fit and fabric entirely
        let csv = b"groupName,categoryName,subCategoryName,gender,productType,price,variantColor,variantSize,variantQuantity\nSHIELD,DEFENCE UNIFORM,ARMY,MEN,SHIRT,900,CAMOUFLAGE,L,12".to_vec();
        let mut reader = RowReader::new(&csv, ProductGroup::Shield).unwrap();
        let row = reader.next().unwrap().unwrap();
        assert_eq!(row.identity.fit.as_deref(), Some("CLASSIC FITS"));
        assert_eq!(row.identity.fabric.as_deref(), Some("POLY COTTON"));
    }

    #[test]
    fn malformed_quantity_is_a_row_parse_error_with_line() {
        let csv = heal_csv(&[
            "HEAL,,COATS,,MEDICAL COATS,,UNISEX,SHORT COATS,,,,LAB COATS,750,,BLACK,S,5,",
            "HEAL,,COATS,,MEDICAL COATS,,UNISEX,SHORT COATS,,,,LAB COATS,750,,BLACK,M,abc,",
        ]);
        let mut reader = RowReader::new(&csv, ProductGroup::Heal).unwrap();
        assert!(reader.next().unwrap().is_ok());
        assert_matches!(
            reader.next().unwrap(),
            Err(ServiceError::RowParse { line: 3, reason }) if reason.contains("abc")
        );
    }

    #[test]
    fn negative_quantity_is_rejected() {
        let csv = heal_csv(&[
            "HEAL,,COATS,,MEDICAL COATS,,UNISEX,SHORT COATS,,,,LAB COATS,750,,BLACK,S,-4,",
        ]);
        let mut reader = RowReader::new(&csv, ProductGroup::Heal).unwrap();
        assert_matches!(reader.next().unwrap(), Err(ServiceError::RowParse { .. }));
    }

    #[test]
    fn missing_price_is_allowed() {
        let csv = heal_csv(&[
            "HEAL,,COATS,,MEDICAL COATS,,UNISEX,SHORT COATS,,,,LAB COATS,,,BLACK,S,5,",
        ]);
        assert_eq!(parse_one(&csv).unit_price, None);
    }

    #[test]
    fn reader_restarts_from_source_bytes() {
        let csv = heal_csv(&[
            "HEAL,,COATS,,MEDICAL COATS,,UNISEX,SHORT COATS,,,,LAB COATS,750,,BLACK,S,5,",
        ]);
        let first: Vec<_> = RowReader::new(&csv, ProductGroup::Heal)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        let second: Vec<_> = RowReader::new(&csv, ProductGroup::Heal)
            .unwrap()
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn empty_document_yields_no_rows() {
        let csv = heal_csv(&[]);
        let mut reader = RowReader::new(&csv, ProductGroup::Heal).unwrap();
        assert!(reader.next().is_none());
    }
}
