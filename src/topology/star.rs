
use tracing::warn;

use crate::error::Error;
use crate::network::Network;

///Distance in a star between two different nodes given whether each is a hub.
///Any hub is adjacent to everything, and two spokes are assumed to share some hub.
pub fn star_distance(a_is_hub:bool, b_is_hub:bool) -> usize
{
	if a_is_hub || b_is_hub
	{
		1
	}
	else
	{
		2
	}
}

///Number of nodes in `network` that are hubs, this is, that have a channel to every other node.
pub fn count_hubs(network:&dyn Network) -> Result<usize,Error>
{
	let mut hubs=0;
	for address in 0..network.num_nodes()
	{
		if network.is_hub(address)?
		{
			hubs+=1;
		}
	}
	if hubs==0 && network.num_nodes()>1
	{
		warn!(nodes=network.num_nodes(),"star network without any node linked to all others");
	}
	Ok(hubs)
}
