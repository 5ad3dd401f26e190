/// Length of a generated edit code.
pub const EDIT_CODE_LEN: usize = 6;

/// A point in WGS84 degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

/// The descriptive fields of an offer, as accepted by validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferFields {
    pub postal_code: String,
    pub city: String,
    pub street: Option<String>,
    pub name: String,
    pub email: String,
    pub class_label: Option<String>,
    pub phone: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub notes: Option<String>,
}

/// A stored ride offer.
#[derive(Debug, Clone, PartialEq)]
pub struct Offer {
    pub id: i32,
    pub fields: OfferFields,
    /// `None` only for rows that were never geocoded.
    pub coordinates: Option<Coordinates>,
    pub edit_code: String,
}

/// An offer ready to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOffer {
    pub fields: OfferFields,
    pub coordinates: Coordinates,
    pub edit_code: String,
}

/// Raw offer submission, before validation. Every field may be missing.
#[derive(Debug, Clone, Default)]
pub struct OfferSubmission {
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub class_label: Option<String>,
    pub phone: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub notes: Option<String>,
}

/// Fields to overwrite on an existing offer. `None` leaves the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OfferChanges {
    pub postal_code: Option<String>,
    pub city: Option<String>,
    pub street: Option<String>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub class_label: Option<String>,
    pub phone: Option<String>,
    pub valid_from: Option<String>,
    pub valid_to: Option<String>,
    pub notes: Option<String>,
    pub coordinates: Option<Coordinates>,
}

impl OfferChanges {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Apply the changes to an in-memory offer. Mirrors what the store does
    /// on update.
    pub fn apply_to(&self, offer: &mut Offer) {
        let fields = &mut offer.fields;
        if let Some(v) = &self.postal_code {
            fields.postal_code = v.clone();
        }
        if let Some(v) = &self.city {
            fields.city = v.clone();
        }
        if let Some(v) = &self.name {
            fields.name = v.clone();
        }
        if let Some(v) = &self.email {
            fields.email = v.clone();
        }
        for (target, change) in [
            (&mut fields.street, &self.street),
            (&mut fields.class_label, &self.class_label),
            (&mut fields.phone, &self.phone),
            (&mut fields.valid_from, &self.valid_from),
            (&mut fields.valid_to, &self.valid_to),
            (&mut fields.notes, &self.notes),
        ] {
            if change.is_some() {
                target.clone_from(change);
            }
        }
        if let Some(c) = self.coordinates {
            offer.coordinates = Some(c);
        }
    }
}
