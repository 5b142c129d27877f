use std::io;
use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use catalog_logging::{catalog_debug, catalog_warn};

use crate::service::{ProductService, ReqwestProductService, ServiceSettings};
use crate::{EngineEvent, NewProductBody, RequestId, ServiceError};

enum EngineCommand {
    LoadProducts {
        request_id: RequestId,
    },
    CreateProduct {
        request_id: RequestId,
        product: NewProductBody,
    },
}

/// Receives engine events on the runtime thread.
pub trait EventSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelEventSink {
    tx: mpsc::Sender<EngineEvent>,
}

impl ChannelEventSink {
    pub fn new(tx: mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl EventSink for ChannelEventSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// Runs product service requests on a background tokio runtime.
///
/// Commands return immediately; each finished request is reported to the
/// sink tagged with the request id it was issued under. Dropping the handle
/// shuts the runtime down and abandons in-flight requests.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("product service setup failed: {0}")]
    Service(#[from] ServiceError),
    #[error("failed to start engine runtime: {0}")]
    Runtime(#[from] io::Error),
}

impl EngineHandle {
    /// Engine over the HTTP client, reporting to `sink`.
    pub fn new(settings: ServiceSettings, sink: Arc<dyn EventSink>) -> Result<Self, EngineError> {
        let list_limit = settings.list_limit;
        let service = Arc::new(ReqwestProductService::new(settings)?);
        Ok(Self::with_service(service, list_limit, sink)?)
    }

    /// Engine over any service implementation.
    pub fn with_service(
        service: Arc<dyn ProductService>,
        list_limit: u32,
        sink: Arc<dyn EventSink>,
    ) -> io::Result<Self> {
        let runtime = tokio::runtime::Runtime::new()?;
        let (cmd_tx, cmd_rx) = mpsc::channel();

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let service = service.clone();
                let sink = sink.clone();
                runtime.spawn(async move {
                    handle_command(service.as_ref(), list_limit, command, sink.as_ref()).await;
                });
            }
            catalog_debug!("Engine command channel closed");
        });

        Ok(Self { cmd_tx })
    }

    /// Engine whose events are delivered on the returned channel.
    pub fn channel(
        service: Arc<dyn ProductService>,
        list_limit: u32,
    ) -> io::Result<(Self, EngineEvents)> {
        let (event_tx, event_rx) = mpsc::channel();
        let handle = Self::with_service(
            service,
            list_limit,
            Arc::new(ChannelEventSink::new(event_tx)),
        )?;
        Ok((handle, EngineEvents { event_rx }))
    }

    pub fn load_products(&self, request_id: RequestId) {
        self.send(EngineCommand::LoadProducts { request_id });
    }

    pub fn create_product(&self, request_id: RequestId, product: NewProductBody) {
        self.send(EngineCommand::CreateProduct {
            request_id,
            product,
        });
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            catalog_warn!("Engine thread is gone; command dropped");
        }
    }
}

/// Receiving side of [`EngineHandle::channel`].
pub struct EngineEvents {
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineEvents {
    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    service: &dyn ProductService,
    list_limit: u32,
    command: EngineCommand,
    sink: &dyn EventSink,
) {
    match command {
        EngineCommand::LoadProducts { request_id } => {
            let result = service.list_products(list_limit).await;
            sink.emit(EngineEvent::ProductsLoaded { request_id, result });
        }
        EngineCommand::CreateProduct {
            request_id,
            product,
        } => {
            let result = service.create_product(&product).await;
            sink.emit(EngineEvent::ProductCreated { request_id, result });
        }
    }
}
