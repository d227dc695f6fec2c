// Dweve Ogma - Object Graph Mapping for Cypher Stores
//
// Copyright (c) 2025 Dweve IP B.V. and individual contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Collection merge policy for mapped entity fields.

use ogma_core::Value;

/// Merge incoming collection values with a field's existing ones.
///
/// Incoming values come first, then existing values not already present.
/// Duplicates collapse to the first occurrence, so the result is stable
/// when the same row is applied twice.
pub fn merge_collection(incoming: &[Value], existing: &[Value]) -> Vec<Value> {
    let mut merged: Vec<Value> = Vec::with_capacity(incoming.len() + existing.len());
    for value in incoming.iter().chain(existing) {
        if !merged.contains(value) {
            merged.push(value.clone());
        }
    }
    merged
}
