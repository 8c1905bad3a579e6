//! Per-group structural schemas. A schema declares which identity fields
//! participate in a group's product key, the enumerated domain (if any) for
//! each, parse-time defaults, and the legal size ladder.

use super::ProductGroup;
use serde::{Deserialize, Serialize};

/// The attributes that can participate in a product's identity key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IdentityField {
    Category,
    SubCategory,
    Gender,
    ProductType,
    Fit,
    Neckline,
    Sleeves,
    Fabric,
}

impl IdentityField {
    /// CSV header this field is read from.
    pub fn column_name(&self) -> &'static str {
        match self {
            IdentityField::Category => "categoryName",
            IdentityField::SubCategory => "subCategoryName",
            IdentityField::Gender => "gender",
            IdentityField::ProductType => "productType",
            IdentityField::Fit => "fit",
            IdentityField::Neckline => "neckline",
            IdentityField::Sleeves => "sleeves",
            IdentityField::Fabric => "fabric",
        }
    }
}

/// One identity field's rules within a group schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    pub field: IdentityField,
    /// Enumerated legal values; `None` means unrestricted.
    pub domain: Option<&'static [&'static str]>,
    /// Value substituted when the CSV cell is blank or missing.
    pub default: Option<&'static str>,
    /// Whether a value must be present after defaulting.
    pub required: bool,
}

/// Structural definition of one product group. Identity fields are ordered;
/// together with the group they form the product's natural key.
#[derive(Debug)]
pub struct GroupSchema {
    pub group: ProductGroup,
    pub identity_fields: &'static [FieldSpec],
    /// Color label used when a CSV row carries no variant color.
    pub default_color: &'static str,
    /// The group's catalog color palette; `None` means open-ended. Not a
    /// merge-time constraint: new shades arrive through uploads.
    pub colors: Option<&'static [&'static str]>,
    /// Legal size labels for this group's variants.
    pub sizes: &'static [&'static str],
}

impl GroupSchema {
    /// Spec for one identity field, if the group declares it.
    pub fn field(&self, field: IdentityField) -> Option<&FieldSpec> {
        self.identity_fields.iter().find(|spec| spec.field == field)
    }
}

pub(super) static HEAL: GroupSchema = GroupSchema {
    group: ProductGroup::Heal,
    identity_fields: &[
        FieldSpec {
            field: IdentityField::Category,
            domain: Some(&["COATS", "SCRUBS"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::SubCategory,
            domain: Some(&[
                "MEDICAL COATS",
                "DOCTOR COATS",
                "NURSE SCRUB SETS",
                "REGULAR SCRUB SETS",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Gender,
            domain: Some(&["UNISEX", "MEN", "WOMEN"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::ProductType,
            domain: Some(&["SHORT COATS", "LONG COATS", "TOP", "PANT"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Fit,
            domain: None,
            default: Some("CLASSIC"),
            required: true,
        },
        FieldSpec {
            field: IdentityField::Sleeves,
            domain: Some(&["SHORT SLEEVES", "LONG SLEEVES"]),
            default: None,
            required: false,
        },
        FieldSpec {
            field: IdentityField::Fabric,
            domain: Some(&[
                "POLY COTTON",
                "LAB COATS",
                "SPUN POLYESTER",
                "100% POLYESTER",
            ]),
            default: None,
            required: true,
        },
    ],
    default_color: "COATS COLOR",
    colors: Some(&[
        "BLACK",
        "SAGE GREEN",
        "CHERRY LACQUER",
        "ELECTRIC INDIGO",
        "MAUVE",
        "CELESTIAL YELLOW",
        "DUSTED GRAPE",
        "SEPIA MIDNIGHT PLUM",
        "TERRACOTTA",
        "DIGITAL MIST",
        "COATS COLOR",
    ]),
    sizes: &["XS", "S", "M", "L", "XL", "XXL"],
};

pub(super) static SHIELD: GroupSchema = GroupSchema {
    group: ProductGroup::Shield,
    identity_fields: &[
        FieldSpec {
            field: IdentityField::Category,
            domain: Some(&["DEFENCE UNIFORM", "SECURITY UNIFORM", "POLICE UNIFORM"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::SubCategory,
            domain: Some(&[
                "ARMY",
                "NAVY",
                "AIR FORCE",
                "CRPF UNIFORM",
                "SECURITY GUARD UNIFORM",
                "TRAFFIC POLICE UNIFORM",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Gender,
            domain: Some(&["MEN", "WOMEN"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::ProductType,
            domain: Some(&["SHIRT", "BLAZER", "TROUSER"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Fit,
            domain: Some(&["CLASSIC FITS"]),
            default: Some("CLASSIC FITS"),
            required: true,
        },
        FieldSpec {
            field: IdentityField::Fabric,
            domain: Some(&["POLY COTTON"]),
            default: Some("POLY COTTON"),
            required: true,
        },
    ],
    default_color: "SHIELD COLOR",
    colors: Some(&[
        "OLIVE GREEN",
        "CAMOUFLAGE",
        "NAVY BLUE",
        "SKY BLUE",
        "BLACK",
        "WHITE",
    ]),
    sizes: &["S", "M", "L", "XL", "XXL"],
};

pub(super) static ELITE: GroupSchema = GroupSchema {
    group: ProductGroup::Elite,
    identity_fields: &[
        FieldSpec {
            field: IdentityField::Category,
            domain: Some(&["CORPORATE UNIFORMS"]),
            default: Some("CORPORATE UNIFORMS"),
            required: true,
        },
        FieldSpec {
            field: IdentityField::SubCategory,
            domain: Some(&[
                "ADMIN UNIFORMS",
                "RECEPTIONIST UNIFORMS",
                "CUSTOM UNIFORMS",
                "CUSTOM T-SHIRTS",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Gender,
            domain: Some(&["MEN", "WOMEN"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::ProductType,
            domain: Some(&[
                "SHIRT",
                "T-SHIRT",
                "SKIRT",
                "TROUSER",
                "WAISTCOAT",
                "BLAZER",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Fit,
            domain: Some(&["CLASSIC", "SLIM"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Neckline,
            domain: Some(&["SHIRT COLLAR", "MANDERIN COLLAR"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Sleeves,
            domain: Some(&["SHORT SLEEVES", "LONG SLEEVES"]),
            default: None,
            required: true,
        },
    ],
    default_color: "ELITE COLOR",
    colors: Some(&[
        "WHITE",
        "BLACK",
        "INDIGO",
        "SKY BLUE",
        "NAVY BLUE",
        "GREEN",
        "GREY",
        "MAROON",
        "RED",
    ]),
    sizes: &["S", "M", "L", "XL", "XXL"],
};

pub(super) static TOGS: GroupSchema = GroupSchema {
    group: ProductGroup::Togs,
    identity_fields: &[
        FieldSpec {
            field: IdentityField::Category,
            domain: Some(&["SCHOOL UNIFORMS"]),
            default: Some("SCHOOL UNIFORMS"),
            required: true,
        },
        FieldSpec {
            field: IdentityField::SubCategory,
            domain: Some(&[
                "REGULAR SCHOOL UNIFORMS",
                "SPORTS UNIFORMS",
                "WINTER UNIFORMS",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Gender,
            domain: Some(&["GIRL", "BOY"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::ProductType,
            domain: Some(&[
                "SHIRT",
                "T-SHIRT",
                "SKIRTS",
                "TROUSER",
                "WAISTCOAT",
                "BLAZER",
                "TRACK PANTS",
                "HOODIES",
                "SWEATSHIRTS",
                "JACKETS",
                "PINAFORE",
                "CULOTTES",
                "PANTS",
                "SHORTS",
                "SWEATER",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Fit,
            domain: None,
            default: Some("CLASSIC"),
            required: true,
        },
    ],
    default_color: "TOGS COLOR",
    colors: None,
    sizes: &[
        "22", "24", "26", "28", "30", "32", "34", "36", "38", "40", "42", "44",
    ],
};

pub(super) static SPIRIT: GroupSchema = GroupSchema {
    group: ProductGroup::Spirit,
    identity_fields: &[
        FieldSpec {
            field: IdentityField::Category,
            domain: Some(&["SPORTS WEAR"]),
            default: Some("SPORTS WEAR"),
            required: true,
        },
        FieldSpec {
            field: IdentityField::Gender,
            domain: Some(&["MEN", "WOMEN", "UNISEX"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::ProductType,
            domain: Some(&[
                "JACKETS",
                "JERSEY T-SHIRT",
                "TRACK PANT",
                "SHORTS",
                "JOGGERS",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Neckline,
            domain: Some(&["POLO NECK", "ROUND NECK"]),
            default: None,
            required: false,
        },
        FieldSpec {
            field: IdentityField::Sleeves,
            domain: Some(&["FULL SLEEVES", "HALF SLEEVES", "SLEEVELESS"]),
            default: None,
            required: false,
        },
    ],
    default_color: "SPIRITS COLOR",
    colors: None,
    sizes: &["XS", "S", "M", "L", "XL", "XXL"],
};

pub(super) static WORK_WEAR: GroupSchema = GroupSchema {
    group: ProductGroup::WorkWear,
    identity_fields: &[
        FieldSpec {
            field: IdentityField::Category,
            domain: Some(&[
                "AUTOMOBILE UNIFORM",
                "ENERGY UNIFORMS",
                "REFLECTIVE UNIFORMS",
            ]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Gender,
            domain: Some(&["MEN", "WOMEN"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::ProductType,
            domain: Some(&["SHIRT", "T-SHIRT", "TROUSER", "OVERALLS"]),
            default: None,
            required: true,
        },
        FieldSpec {
            field: IdentityField::Fit,
            domain: None,
            default: Some("CLASSIC FIT"),
            required: true,
        },
    ],
    default_color: "WORK WEAR COLOR",
    colors: None,
    sizes: &["S", "M", "L", "XL", "XXL"],
};
