use std::sync::{mpsc, Arc};

use catalog_core::{CreatedProduct, Effect, LoadFailure, Msg, NewProduct, Product, SubmitFailure};
use catalog_engine::{
    CreatedProductRecord, EngineEvent, EngineHandle, EventSink, NewProductBody, ProductRecord,
    ServiceSettings,
};
use catalog_logging::{catalog_info, catalog_warn};

use super::app::AppEvent;

pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(settings: ServiceSettings, events: mpsc::Sender<AppEvent>) -> anyhow::Result<Self> {
        let sink = Arc::new(MsgSink { events });
        let engine = EngineHandle::new(settings, sink)?;
        Ok(Self { engine })
    }

    pub fn run(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchProducts { request_id } => {
                    catalog_info!("FetchProducts request_id={}", request_id);
                    self.engine.load_products(request_id);
                }
                Effect::CreateProduct {
                    request_id,
                    product,
                } => {
                    catalog_info!(
                        "CreateProduct request_id={} title_len={}",
                        request_id,
                        product.title.len()
                    );
                    self.engine.create_product(request_id, map_new_product(product));
                }
            }
        }
    }
}

/// Turns engine events into core messages on the main loop's channel.
struct MsgSink {
    events: mpsc::Sender<AppEvent>,
}

impl EventSink for MsgSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.events.send(AppEvent::Core(map_event(event)));
    }
}

pub(crate) fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ProductsLoaded { request_id, result } => Msg::ProductsLoaded {
            request_id,
            result: result
                .map(|page| page.products.into_iter().map(map_record).collect())
                .map_err(|err| {
                    catalog_warn!("Load {} failed: {}", request_id, err);
                    LoadFailure::new(err.to_string())
                }),
        },
        EngineEvent::ProductCreated { request_id, result } => Msg::ProductCreated {
            request_id,
            result: result.map(map_created).map_err(|err| {
                catalog_warn!("Create {} failed: {}", request_id, err);
                SubmitFailure::new(err.to_string())
            }),
        },
    }
}

fn map_record(record: ProductRecord) -> Product {
    Product {
        id: record.id,
        title: record.title,
        price: record.price,
        thumbnail: record.thumbnail,
    }
}

fn map_created(record: CreatedProductRecord) -> CreatedProduct {
    CreatedProduct {
        id: record.id,
        title: record.title,
        price: record.price,
    }
}

fn map_new_product(product: NewProduct) -> NewProductBody {
    NewProductBody {
        title: product.title,
        price: product.price,
    }
}
