// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Chart module: Line charts rendered straight to PNG bytes. Every call owns
// its own canvas and font handle; nothing is shared between calls.

pub mod render;
mod text;
