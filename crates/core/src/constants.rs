// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared constants for the dispatch layer

/// Marker token that starts a bot command inside a comment
pub const COMMAND_MARKER: &str = "/tug";

/// Substitute URL for forges that reject status updates with an empty URL
pub const STATUS_URL_PLACEHOLDER: &str = "https://tugboat.dev/docs/jobs";

/// Status-create rejection the forge uses for "accepted but queued"
pub const STATUS_CREATE_QUEUED: u16 = 400;
/// Status-create rejection for missing permissions
pub const STATUS_CREATE_FORBIDDEN: u16 = 403;
/// Status-create rejection when the commit is unknown to the forge
pub const STATUS_CREATE_NOT_FOUND: u16 = 404;

/// Rejection codes that degrade to a commit comment instead of failing the caller
pub const RECOVERABLE_STATUS_CODES: [u16; 3] = [
    STATUS_CREATE_QUEUED,
    STATUS_CREATE_FORBIDDEN,
    STATUS_CREATE_NOT_FOUND,
];
