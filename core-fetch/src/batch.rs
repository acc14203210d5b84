//! Batch conversion of host messages.
//!
//! Conversions run one after another in input order. The first failure
//! aborts the batch and no partial result is returned. A body read that
//! never settles stalls the whole batch unless the adapter has a body
//! timeout or cancellation token.

use crate::adapter::FetchAdapter;
use crate::body::block;
use crate::convert;
use crate::error::Result;
use crate::model::{WebRequest, WebResponse};
use bridge_traits::{HostCollection, HostPlatform};
use tracing::debug;

impl<P: HostPlatform> FetchAdapter<P> {
    pub fn requests_from_host(&self, hosts: &[P::Request]) -> Result<Vec<WebRequest<P::Request>>> {
        block(self.requests_from_host_async(hosts))
    }

    pub fn responses_from_host(
        &self,
        hosts: &[P::Response],
    ) -> Result<Vec<WebResponse<P::Response>>> {
        block(self.responses_from_host_async(hosts))
    }

    pub async fn requests_from_host_async(
        &self,
        hosts: &[P::Request],
    ) -> Result<Vec<WebRequest<P::Request>>> {
        let mut records = Vec::with_capacity(hosts.len());
        for host in hosts {
            records.push(self.request_from_host_async(host).await?);
        }
        debug!(count = records.len(), "Request batch converted");
        Ok(records)
    }

    pub async fn responses_from_host_async(
        &self,
        hosts: &[P::Response],
    ) -> Result<Vec<WebResponse<P::Response>>> {
        let mut records = Vec::with_capacity(hosts.len());
        for host in hosts {
            records.push(self.response_from_host_async(host).await?);
        }
        debug!(count = records.len(), "Response batch converted");
        Ok(records)
    }

    /// Converts every request held by a host array.
    pub fn requests_from_collection<C>(&self, collection: &C) -> Result<Vec<WebRequest<P::Request>>>
    where
        C: HostCollection<Item = P::Request> + ?Sized,
    {
        self.requests_from_host(&convert::object_list(collection))
    }

    /// Converts every response held by a host array.
    pub fn responses_from_collection<C>(
        &self,
        collection: &C,
    ) -> Result<Vec<WebResponse<P::Response>>>
    where
        C: HostCollection<Item = P::Response> + ?Sized,
    {
        self.responses_from_host(&convert::object_list(collection))
    }
}
