// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

//! Hash related utils.

use md5::Digest;
use md5::Md5;

/// Hex encoded MD5 hash.
///
/// Use this function instead of `hex::encode(md5(content))` can reduce
/// extra copy.
pub fn hex_md5(content: &[u8]) -> String {
    hex::encode(Md5::digest(content).as_slice())
}

/// Hex encoded MD5 hash over the concatenation of all parts.
///
/// Parts are fed in order with no separator, so
/// `hex_md5_concat(&[a, b])` equals `hex_md5(&[a, b].concat())`.
pub fn hex_md5_concat(parts: &[&[u8]]) -> String {
    let mut h = Md5::new();
    for part in parts {
        h.update(part);
    }

    hex::encode(h.finalize().as_slice())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_hex_md5() {
        assert_eq!(hex_md5(b""), "d41d8cd98f00b204e9800998ecf8427e");
        assert_eq!(
            hex_md5(b"The quick brown fox jumps over the lazy dog"),
            "9e107d9d372bb6826bd81d3542a419d6"
        );
    }

    #[test]
    fn test_hex_md5_concat_matches_joined_input() {
        let joined = hex_md5(b"secretnonce1700000000");
        let parts = hex_md5_concat(&[b"secret".as_slice(), b"nonce", b"1700000000"]);
        assert_eq!(joined, parts);
    }
}
