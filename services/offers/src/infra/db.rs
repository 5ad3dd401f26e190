use anyhow::Context as _;
use sea_orm::{
    ActiveModelTrait,
    ActiveValue::{NotSet, Set},
    ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
};

use mitfahr_offers_schema::offers;

use crate::domain::repository::OfferRepository;
use crate::domain::types::{Coordinates, NewOffer, Offer, OfferChanges, OfferFields};
use crate::error::OffersServiceError;

// ── Offer repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOfferRepository {
    pub db: DatabaseConnection,
}

impl OfferRepository for DbOfferRepository {
    async fn create(&self, offer: &NewOffer) -> Result<i32, OffersServiceError> {
        let f = &offer.fields;
        let model = offers::ActiveModel {
            id: NotSet,
            postal_code: Set(f.postal_code.clone()),
            city: Set(f.city.clone()),
            street: Set(f.street.clone()),
            name: Set(f.name.clone()),
            email: Set(f.email.clone()),
            class_label: Set(f.class_label.clone()),
            phone: Set(f.phone.clone()),
            valid_from: Set(f.valid_from.clone()),
            valid_to: Set(f.valid_to.clone()),
            notes: Set(f.notes.clone()),
            latitude: Set(Some(offer.coordinates.latitude)),
            longitude: Set(Some(offer.coordinates.longitude)),
            edit_code: Set(offer.edit_code.clone()),
        }
        .insert(&self.db)
        .await
        .context("create offer")?;
        Ok(model.id)
    }

    async fn list_all(&self) -> Result<Vec<Offer>, OffersServiceError> {
        let models = offers::Entity::find()
            .order_by_asc(offers::Column::Id)
            .all(&self.db)
            .await
            .context("list offers")?;
        Ok(models.into_iter().map(offer_from_model).collect())
    }

    async fn find_by_location(
        &self,
        postal_code: &str,
        city: &str,
    ) -> Result<Vec<Offer>, OffersServiceError> {
        let models = offers::Entity::find()
            .filter(offers::Column::PostalCode.eq(postal_code))
            .filter(offers::Column::City.eq(city))
            .order_by_asc(offers::Column::Id)
            .all(&self.db)
            .await
            .context("find offers by location")?;
        Ok(models.into_iter().map(offer_from_model).collect())
    }

    async fn find_by_edit_code(
        &self,
        edit_code: &str,
    ) -> Result<Option<Offer>, OffersServiceError> {
        let model = offers::Entity::find()
            .filter(offers::Column::EditCode.eq(edit_code))
            .one(&self.db)
            .await
            .context("find offer by edit code")?;
        Ok(model.map(offer_from_model))
    }

    async fn update(&self, id: i32, changes: &OfferChanges) -> Result<(), OffersServiceError> {
        let mut am = offers::ActiveModel {
            id: Set(id),
            ..Default::default()
        };
        if let Some(v) = &changes.postal_code {
            am.postal_code = Set(v.clone());
        }
        if let Some(v) = &changes.city {
            am.city = Set(v.clone());
        }
        if let Some(v) = &changes.street {
            am.street = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.name {
            am.name = Set(v.clone());
        }
        if let Some(v) = &changes.email {
            am.email = Set(v.clone());
        }
        if let Some(v) = &changes.class_label {
            am.class_label = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.phone {
            am.phone = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.valid_from {
            am.valid_from = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.valid_to {
            am.valid_to = Set(Some(v.clone()));
        }
        if let Some(v) = &changes.notes {
            am.notes = Set(Some(v.clone()));
        }
        if let Some(c) = changes.coordinates {
            am.latitude = Set(Some(c.latitude));
            am.longitude = Set(Some(c.longitude));
        }
        am.update(&self.db).await.context("update offer")?;
        Ok(())
    }
}

fn offer_from_model(model: offers::Model) -> Offer {
    let coordinates = match (model.latitude, model.longitude) {
        (Some(latitude), Some(longitude)) => Some(Coordinates {
            latitude,
            longitude,
        }),
        _ => None,
    };
    Offer {
        id: model.id,
        fields: OfferFields {
            postal_code: model.postal_code,
            city: model.city,
            street: model.street,
            name: model.name,
            email: model.email,
            class_label: model.class_label,
            phone: model.phone,
            valid_from: model.valid_from,
            valid_to: model.valid_to,
            notes: model.notes,
        },
        coordinates,
        edit_code: model.edit_code,
    }
}
