use std::marker::PhantomData;

use bson::{Bson, Document};
use serde::de::DeserializeOwned;
use vellum_binding::{
    AsyncChannel, AsyncChannelSource, AsyncReadBinding, Cancellation, Channel, ChannelBinding,
    ChannelSource, EncoderSettings, ReadBinding,
};

use crate::command::build_command;
use crate::concern::ReadConcern;
use crate::cursor::SingleBatchCursor;
use crate::error::OperationError;
use crate::executor;
use crate::max_time::MaxTime;
use crate::namespace::Namespace;

/// A `distinct` read operation: the unique values of one field across
/// the documents of a collection matching an optional filter.
///
/// `T` is the element type the reply's values decode into. The
/// operation is reusable and holds only read-only configuration; each
/// call to [`execute`](DistinctOperation::execute) or
/// [`execute_async`](DistinctOperation::execute_async) acquires its
/// own channel, re-checks server capabilities against the freshly
/// negotiated version, and builds a fresh command document.
pub struct DistinctOperation<T> {
    namespace: Namespace,
    field_name: String,
    filter: Option<Document>,
    max_time: Option<MaxTime>,
    read_concern: ReadConcern,
    collation: Option<Document>,
    comment: Option<Bson>,
    encoder_settings: EncoderSettings,
    _values: PhantomData<fn() -> T>,
}

impl<T> DistinctOperation<T> {
    /// Fails with [`OperationError::InvalidArgument`] if `field_name`
    /// is empty.
    pub fn new(
        namespace: Namespace,
        field_name: impl Into<String>,
    ) -> Result<Self, OperationError> {
        let field_name = field_name.into();
        if field_name.is_empty() {
            return Err(OperationError::InvalidArgument(
                "field name must not be empty".into(),
            ));
        }
        Ok(Self {
            namespace,
            field_name,
            filter: None,
            max_time: None,
            read_concern: ReadConcern::server_default(),
            collation: None,
            comment: None,
            encoder_settings: EncoderSettings::default(),
            _values: PhantomData,
        })
    }

    /// Restricts the candidate documents.
    pub fn filter(mut self, filter: Document) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Caps server-side execution time.
    pub fn max_time(mut self, max_time: MaxTime) -> Self {
        self.max_time = Some(max_time);
        self
    }

    pub fn read_concern(mut self, read_concern: ReadConcern) -> Self {
        self.read_concern = read_concern;
        self
    }

    pub fn collation(mut self, collation: Document) -> Self {
        self.collation = Some(collation);
        self
    }

    /// Attaches an arbitrary comment to the command, e.g. for server
    /// log correlation.
    pub fn comment(mut self, comment: Bson) -> Self {
        self.comment = Some(comment);
        self
    }

    pub fn encoder_settings(mut self, settings: EncoderSettings) -> Self {
        self.encoder_settings = settings;
        self
    }

    pub(crate) fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    pub(crate) fn field_name(&self) -> &str {
        &self.field_name
    }

    pub(crate) fn filter_ref(&self) -> Option<&Document> {
        self.filter.as_ref()
    }

    pub(crate) fn max_time_ref(&self) -> Option<MaxTime> {
        self.max_time
    }

    pub(crate) fn read_concern_ref(&self) -> &ReadConcern {
        &self.read_concern
    }

    pub(crate) fn collation_ref(&self) -> Option<&Document> {
        self.collation.as_ref()
    }

    pub(crate) fn comment_ref(&self) -> Option<&Bson> {
        self.comment.as_ref()
    }
}

impl<T: DeserializeOwned> DistinctOperation<T> {
    /// Blocking call shape.
    ///
    /// Acquires source, channel, and narrowed binding in that order;
    /// all three release in reverse on every exit, including errors
    /// and cancellation.
    pub fn execute<B: ReadBinding>(
        &self,
        binding: &B,
        cancel: &Cancellation,
    ) -> Result<SingleBatchCursor<T>, OperationError> {
        if cancel.is_cancelled() {
            return Err(OperationError::Cancelled);
        }
        let mut source = binding.channel_source(cancel)?;
        if cancel.is_cancelled() {
            return Err(OperationError::Cancelled);
        }
        let channel = source.channel(cancel)?;
        let mut bound = ChannelBinding::new(channel, source, binding.read_preference());

        let version = bound.channel().server_version();
        let command = build_command(self, version)?;
        tracing::debug!(
            namespace = %self.namespace,
            key = %self.field_name,
            %version,
            "built distinct command"
        );

        let values = executor::run(
            &mut bound,
            self.namespace.database(),
            &command,
            &self.encoder_settings,
            cancel,
        )?;
        Ok(SingleBatchCursor::new(values))
    }

    /// Suspendable call shape; semantically identical to
    /// [`execute`](DistinctOperation::execute).
    pub async fn execute_async<B: AsyncReadBinding>(
        &self,
        binding: &B,
        cancel: &Cancellation,
    ) -> Result<SingleBatchCursor<T>, OperationError> {
        if cancel.is_cancelled() {
            return Err(OperationError::Cancelled);
        }
        let mut source = binding.channel_source(cancel).await?;
        if cancel.is_cancelled() {
            return Err(OperationError::Cancelled);
        }
        let channel = source.channel(cancel).await?;
        let mut bound = ChannelBinding::new(channel, source, binding.read_preference());

        let version = bound.channel().server_version();
        let command = build_command(self, version)?;
        tracing::debug!(
            namespace = %self.namespace,
            key = %self.field_name,
            %version,
            "built distinct command"
        );

        let values = executor::run_async(
            &mut bound,
            self.namespace.database(),
            &command,
            &self.encoder_settings,
            cancel,
        )
        .await?;
        Ok(SingleBatchCursor::new(values))
    }
}
